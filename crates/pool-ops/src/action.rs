//! The pool actions offered by the menu.
//!
//! Each variant carries its menu id, backend endpoint, first-phase method,
//! prompt steps, and the fields echoed into the signed-transaction POST.

use pool_api::HttpMethod;

use crate::echo::{EchoField, EchoSource};
use crate::prompt::{PromptStep, ValueKind};

/// Highest selectable menu id.
pub const MAX_ACTION_ID: i64 = 13;

/// Prefix marking endpoints that require the admin signature.
pub const ADMIN_PREFIX: &str = "admin/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreatePool,
    JoinPool,
    LeavePool,
    ClaimEarnings,
    UpdateLockThreshold,
    WithdrawPool,
    DepositEarnings,
    UpdateUnlockDate,
    UpdateApr,
    RefundCreationFee,
    EndPool,
    TogglePoolVisibility,
    UpdatePoolConfig,
}

const MINT: PromptStep = PromptStep::new("mint", "Enter token mint address: ", ValueKind::Text);
const LOCK_DURATION: PromptStep = PromptStep::new("lockDuration", "Enter lock duration: ", ValueKind::Integer);
const AMOUNT: PromptStep = PromptStep::new("amount", "Enter amount: ", ValueKind::Number);
const RECEIPT_ID: PromptStep = PromptStep::new("receiptId", "Enter receipt ID: ", ValueKind::Integer).query_typed();
const LOCK_THRESHOLD: PromptStep = PromptStep::new("lockThreshold", "Enter lock threshold: ", ValueKind::Number);
const UPDATE_SMART_CONTRACT: PromptStep =
    PromptStep::new("updateSmartContract", "Update smart contract? (true/false): ", ValueKind::Bool);
const BLOCK_JOIN_POOL: PromptStep =
    PromptStep::new("blockJoinPool", "Block join pool? (true/false): ", ValueKind::Bool).query_typed();
const EARNINGS: PromptStep = PromptStep::new("earnings", "Enter earnings: ", ValueKind::Number).query_typed();
const SOL_EARNINGS: PromptStep = PromptStep::new("solEarnings", "Enter SOL earnings: ", ValueKind::Number).query_typed();
const OFFSET: PromptStep = PromptStep::new("offset", "Enter offset: ", ValueKind::Number).query_typed();
const UNLOCK_DATE: PromptStep =
    PromptStep::new("unlockDate", "Enter unlock date (Unix timestamp): ", ValueKind::Integer);
const APR: PromptStep = PromptStep::new("apr", "Enter APR: ", ValueKind::Number);

const ECHO_POOL_ID: EchoField = EchoField::typed("poolId");
const ECHO_CREATED_POOL_ID: EchoField = EchoField::new("poolId", EchoSource::ResponsePoolId);
const ECHO_ISSUED_RECEIPT_ID: EchoField = EchoField::new("receiptId", EchoSource::ResponseReceiptId);
const ECHO_AMOUNT: EchoField = EchoField::typed("amount");
const ECHO_RECEIPT_ID: EchoField = EchoField::typed("receiptId");
const ECHO_LOCK_THRESHOLD: EchoField = EchoField::typed("lockThreshold");
const ECHO_BLOCK_JOIN_POOL: EchoField = EchoField::typed("blockJoinPool");
const ECHO_EARNINGS: EchoField = EchoField::typed("earnings");
const ECHO_SOL_EARNINGS: EchoField = EchoField::typed("solEarnings");
const ECHO_OFFSET: EchoField = EchoField::typed("offset");
const ECHO_UNLOCK_DATE: EchoField = EchoField::raw("unlockDate");
const ECHO_LOCK_DURATION: EchoField = EchoField::raw("lockDuration");

impl Action {
    /// All actions in menu order.
    pub const ALL: [Action; 13] = [
        Action::CreatePool,
        Action::JoinPool,
        Action::LeavePool,
        Action::ClaimEarnings,
        Action::UpdateLockThreshold,
        Action::WithdrawPool,
        Action::DepositEarnings,
        Action::UpdateUnlockDate,
        Action::UpdateApr,
        Action::RefundCreationFee,
        Action::EndPool,
        Action::TogglePoolVisibility,
        Action::UpdatePoolConfig,
    ];

    pub fn id(&self) -> i64 {
        match self {
            Action::CreatePool => 1,
            Action::JoinPool => 2,
            Action::LeavePool => 3,
            Action::ClaimEarnings => 4,
            Action::UpdateLockThreshold => 5,
            Action::WithdrawPool => 6,
            Action::DepositEarnings => 7,
            Action::UpdateUnlockDate => 8,
            Action::UpdateApr => 9,
            Action::RefundCreationFee => 10,
            Action::EndPool => 11,
            Action::TogglePoolVisibility => 12,
            Action::UpdatePoolConfig => 13,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::CreatePool => "Create Pool",
            Action::JoinPool => "Join Pool",
            Action::LeavePool => "Leave Pool",
            Action::ClaimEarnings => "Claim Earnings",
            Action::UpdateLockThreshold => "Set Threshold (Admin)",
            Action::WithdrawPool => "Withdraw Pool (Admin)",
            Action::DepositEarnings => "Deposit Earnings (Admin)",
            Action::UpdateUnlockDate => "Update Lock Duration (Admin)",
            Action::UpdateApr => "Update APR (Admin)",
            Action::RefundCreationFee => "Refund Creation Fee (Admin)",
            Action::EndPool => "End Pool (Admin)",
            Action::TogglePoolVisibility => "Toggle Pool Visibility (Admin)",
            Action::UpdatePoolConfig => "Update Pool Config (Admin)",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Action::CreatePool => "create-pool",
            Action::JoinPool => "join-pool",
            Action::LeavePool => "leave-pool",
            Action::ClaimEarnings => "claim-earnings",
            Action::UpdateLockThreshold => "admin/update-lock-threshold",
            Action::WithdrawPool => "admin/withdraw-pool",
            Action::DepositEarnings => "admin/deposit-earnings",
            Action::UpdateUnlockDate => "admin/update-unlock-date",
            Action::UpdateApr => "admin/update-apr",
            Action::RefundCreationFee => "admin/refund-creation-fee",
            Action::EndPool => "admin/end-pool",
            Action::TogglePoolVisibility => "admin/toggle-pool-visibility",
            Action::UpdatePoolConfig => "admin/pool-config",
        }
    }

    /// Method of the first request; the signed submission is always POST.
    pub fn method(&self) -> HttpMethod {
        match self {
            Action::UpdateApr | Action::TogglePoolVisibility | Action::UpdatePoolConfig => HttpMethod::Put,
            _ => HttpMethod::Get,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.endpoint().starts_with(ADMIN_PREFIX)
    }

    /// Every action except pool creation targets an existing pool.
    pub fn needs_pool_id(&self) -> bool {
        *self != Action::CreatePool
    }

    /// Action-specific prompt steps, after the pool id.
    pub fn steps(&self) -> &'static [PromptStep] {
        match self {
            Action::CreatePool => &[MINT, LOCK_DURATION],
            Action::JoinPool => &[AMOUNT],
            Action::LeavePool | Action::ClaimEarnings => &[RECEIPT_ID],
            Action::UpdateLockThreshold => &[LOCK_THRESHOLD, UPDATE_SMART_CONTRACT],
            Action::WithdrawPool => &[BLOCK_JOIN_POOL],
            Action::DepositEarnings => &[EARNINGS, SOL_EARNINGS, OFFSET],
            Action::UpdateUnlockDate => &[UNLOCK_DATE],
            Action::UpdateApr => &[APR],
            Action::RefundCreationFee | Action::EndPool | Action::TogglePoolVisibility => &[],
            Action::UpdatePoolConfig => &[LOCK_DURATION, LOCK_THRESHOLD],
        }
    }

    /// Fields added to the signed-transaction POST body besides wallet and transaction.
    pub fn echo_fields(&self) -> &'static [EchoField] {
        match self {
            Action::CreatePool => &[ECHO_CREATED_POOL_ID],
            Action::JoinPool => &[ECHO_POOL_ID, ECHO_AMOUNT, ECHO_ISSUED_RECEIPT_ID],
            Action::LeavePool => &[ECHO_POOL_ID, ECHO_RECEIPT_ID],
            Action::ClaimEarnings => &[ECHO_RECEIPT_ID],
            Action::UpdateLockThreshold => &[ECHO_POOL_ID, ECHO_LOCK_THRESHOLD],
            Action::WithdrawPool => &[ECHO_POOL_ID, ECHO_BLOCK_JOIN_POOL],
            Action::DepositEarnings => &[ECHO_POOL_ID, ECHO_EARNINGS, ECHO_SOL_EARNINGS, ECHO_OFFSET],
            Action::UpdateUnlockDate => &[ECHO_POOL_ID, ECHO_UNLOCK_DATE],
            Action::UpdateApr
            | Action::RefundCreationFee
            | Action::EndPool
            | Action::TogglePoolVisibility => &[ECHO_POOL_ID],
            Action::UpdatePoolConfig => &[ECHO_POOL_ID, ECHO_LOCK_THRESHOLD, ECHO_LOCK_DURATION],
        }
    }

    pub fn from_id(id: i64) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Look up by full endpoint, or by endpoint without the admin prefix.
    pub fn from_endpoint(endpoint: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| {
            a.endpoint() == endpoint || a.endpoint().strip_prefix(ADMIN_PREFIX) == Some(endpoint)
        })
    }

    /// Parse a menu id or an endpoint name.
    pub fn parse(s: &str) -> Option<Action> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(id) => Action::from_id(id),
            Err(_) => Action::from_endpoint(s),
        }
    }
}

/// One line of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Run(Action),
    Exit,
}

impl MenuEntry {
    pub fn id(&self) -> i64 {
        match self {
            MenuEntry::Run(action) => action.id(),
            MenuEntry::Exit => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MenuEntry::Run(action) => action.name(),
            MenuEntry::Exit => "Exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_endpoints_unique() {
        let ids: HashSet<_> = Action::ALL.iter().map(|a| a.id()).collect();
        let endpoints: HashSet<_> = Action::ALL.iter().map(|a| a.endpoint()).collect();
        assert_eq!(ids.len(), Action::ALL.len());
        assert_eq!(endpoints.len(), Action::ALL.len());
        assert!(ids.iter().all(|id| (1..=MAX_ACTION_ID).contains(id)));
    }

    #[test]
    fn test_lookup() {
        for action in Action::ALL {
            assert_eq!(Action::from_id(action.id()), Some(action));
            assert_eq!(Action::parse(action.endpoint()), Some(action));
        }
        assert_eq!(Action::from_id(0), None);
        assert_eq!(Action::from_id(14), None);
        assert_eq!(Action::from_id(-1), None);
        assert_eq!(Action::parse("update-apr"), Some(Action::UpdateApr));
        assert_eq!(Action::parse(" 9 "), Some(Action::UpdateApr));
        assert_eq!(Action::parse("stake"), None);
    }

    #[test]
    fn test_admin_and_methods() {
        let admin: Vec<_> = Action::ALL.iter().filter(|a| a.is_admin()).map(|a| a.id()).collect();
        assert_eq!(admin, (5..=13).collect::<Vec<_>>());

        let put: Vec<_> = Action::ALL.iter().filter(|a| a.method() == HttpMethod::Put).copied().collect();
        assert_eq!(put, vec![Action::UpdateApr, Action::TogglePoolVisibility, Action::UpdatePoolConfig]);
    }

    #[test]
    fn test_steps_do_not_ask_for_pool_id() {
        for action in Action::ALL {
            assert!(action.steps().iter().all(|s| s.key != "poolId"));
        }
        assert!(!Action::CreatePool.needs_pool_id());
        assert!(Action::ClaimEarnings.needs_pool_id());
    }
}
