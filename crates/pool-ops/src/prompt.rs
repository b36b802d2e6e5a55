//! Typed prompt steps and the collection pipeline shared by every surface.

use serde_json::{Number, Value};
use pool_types::{PoolError, Result};

use crate::console::Console;

/// Expected type of a collected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Non-empty free text.
    Text,
    Integer,
    Number,
    /// `true` or `false`, case-insensitive.
    Bool,
}

impl ValueKind {
    fn expected(&self) -> &'static str {
        match self {
            ValueKind::Text => "a non-empty value",
            ValueKind::Integer => "an integer",
            ValueKind::Number => "a number",
            ValueKind::Bool => "true or false",
        }
    }

    /// Validate raw input and convert it to its typed JSON value.
    pub fn parse(&self, key: &str, input: &str) -> Result<ParamValue> {
        let raw = input.trim();
        let value = match self {
            ValueKind::Text if !raw.is_empty() => Some(Value::String(raw.to_string())),
            ValueKind::Text => None,
            ValueKind::Integer => parse_integer(raw).map(Value::Number),
            ValueKind::Number => parse_integer(raw)
                .or_else(|| raw.parse::<f64>().ok().and_then(number_from_f64))
                .map(Value::Number),
            ValueKind::Bool if raw.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            ValueKind::Bool if raw.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
            ValueKind::Bool => None,
        };

        value
            .map(|value| ParamValue {
                raw: raw.to_string(),
                query: raw.to_string(),
                value,
            })
            .ok_or_else(|| {
                PoolError::InvalidInput(format!(
                    "{}: expected {}, got {:?}",
                    key,
                    self.expected(),
                    raw
                ))
            })
    }
}

/// Finite floats only; integral values within 2^53 become integers.
fn number_from_f64(f: f64) -> Option<Number> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        return Some(Number::from(f as i64));
    }
    Number::from_f64(f)
}

fn parse_integer(raw: &str) -> Option<Number> {
    raw.parse::<i64>()
        .map(Number::from)
        .or_else(|_| raw.parse::<u64>().map(Number::from))
        .ok()
}

/// One question asked while preparing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptStep {
    /// Query parameter name the answer is sent under.
    pub key: &'static str,
    pub question: &'static str,
    pub kind: ValueKind,
    /// Send the converted value in the query string instead of the text as entered.
    pub typed_query: bool,
}

impl PromptStep {
    pub const fn new(key: &'static str, question: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            question,
            kind,
            typed_query: false,
        }
    }

    pub const fn query_typed(self) -> Self {
        Self {
            typed_query: true,
            ..self
        }
    }

    /// Validate an answer to this step.
    pub fn parse(&self, input: &str) -> Result<ParamValue> {
        let mut value = self.kind.parse(self.key, input)?;
        if self.typed_query {
            value.query = render(&value.value);
        }
        Ok(value)
    }
}

/// Asked for every action except pool creation when no pool is cached.
pub const POOL_ID_STEP: PromptStep = PromptStep::new("poolId", "Enter pool ID: ", ValueKind::Text);

/// A collected value: the text as entered, its query-string form, and its
/// typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValue {
    pub raw: String,
    pub query: String,
    pub value: Value,
}

impl ParamValue {
    pub fn text(s: &str) -> Self {
        Self {
            raw: s.to_string(),
            query: s.to_string(),
            value: Value::String(s.to_string()),
        }
    }

    /// Wrap a value received from the backend, keeping its JSON type.
    pub fn from_value(value: &Value) -> Self {
        let text = render(value);
        Self {
            raw: text.clone(),
            query: text,
            value: value.clone(),
        }
    }
}

/// Text form of a JSON scalar; integral floats drop the fraction (`1e3` → `1000`).
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Collected parameters in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(&'static str, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: ParamValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run `steps` in order against `console`, appending answers to `params`.
///
/// Interactive consoles are re-asked until the answer validates; others fail
/// on the first invalid answer.
pub async fn collect(
    console: &mut dyn Console,
    steps: &[PromptStep],
    params: &mut Params,
) -> Result<()> {
    for step in steps {
        loop {
            let answer = console.answer(step).await?;
            match step.parse(&answer) {
                Ok(value) => {
                    params.insert(step.key, value);
                    break;
                }
                Err(e) if console.is_interactive() => {
                    console.show(&format!("{}. Please try again.", e));
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::PresetConsole;
    use crate::scripted::ScriptedConsole;
    use serde_json::json;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(ValueKind::Integer.parse("offset", " 42 ").unwrap().value, json!(42));
        assert_eq!(ValueKind::Number.parse("amount", "2.5").unwrap().value, json!(2.5));
        assert_eq!(ValueKind::Number.parse("amount", "10").unwrap().value, json!(10));
        assert_eq!(ValueKind::Bool.parse("blockJoinPool", "TRUE").unwrap().value, json!(true));
        assert_eq!(ValueKind::Text.parse("mint", "So11").unwrap().raw, "So11");

        assert!(ValueKind::Integer.parse("receiptId", "1.5").is_err());
        assert!(ValueKind::Number.parse("amount", "NaN").is_err());
        assert!(ValueKind::Number.parse("amount", "inf").is_err());
        assert!(ValueKind::Bool.parse("updateSmartContract", "yes").is_err());
        assert!(ValueKind::Text.parse("mint", "   ").is_err());
    }

    #[test]
    fn test_query_keeps_text_as_entered() {
        let amount = PromptStep::new("amount", "Enter amount: ", ValueKind::Number);
        let v = amount.parse(" 1e3 ").unwrap();
        assert_eq!(v.raw, "1e3");
        assert_eq!(v.query, "1e3");
        assert_eq!(v.value, json!(1000));

        let flag = PromptStep::new("updateSmartContract", "?", ValueKind::Bool);
        assert_eq!(flag.parse("TRUE").unwrap().query, "TRUE");
    }

    #[test]
    fn test_typed_query_sends_converted_value() {
        let earnings = PromptStep::new("earnings", "Enter earnings: ", ValueKind::Number).query_typed();
        assert_eq!(earnings.parse("1e3").unwrap().query, "1000");
        assert_eq!(earnings.parse("2.50").unwrap().query, "2.5");

        let receipt = PromptStep::new("receiptId", "Enter receipt ID: ", ValueKind::Integer).query_typed();
        assert_eq!(receipt.parse("007").unwrap().query, "7");

        let block = PromptStep::new("blockJoinPool", "?", ValueKind::Bool).query_typed();
        assert_eq!(block.parse("False").unwrap().query, "false");
    }

    #[test]
    fn test_from_value_keeps_json_type() {
        let numeric = ParamValue::from_value(&json!(17));
        assert_eq!(numeric.raw, "17");
        assert_eq!(numeric.query, "17");
        assert_eq!(numeric.value, json!(17));

        let text = ParamValue::from_value(&json!("pool-7"));
        assert_eq!(text.query, "pool-7");
        assert_eq!(text.value, json!("pool-7"));
    }

    #[test]
    fn test_params_insert_replaces() {
        let mut params = Params::new();
        params.insert("poolId", ParamValue::text("a"));
        params.insert("amount", ParamValue::text("1"));
        params.insert("poolId", ParamValue::text("b"));
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("poolId").unwrap().raw, "b");
        assert_eq!(params.iter().next().unwrap().0, "poolId");
    }

    #[tokio::test]
    async fn test_interactive_collect_reasks() {
        let mut console = ScriptedConsole::new(["abc", "", "7"]);
        let steps = [PromptStep::new("amount", "Enter amount: ", ValueKind::Number)];
        let mut params = Params::new();

        collect(&mut console, &steps, &mut params).await.unwrap();

        assert_eq!(params.get("amount").unwrap().value, json!(7));
        assert_eq!(console.asked().len(), 3);
        assert!(console.output().iter().any(|l| l.contains("expected a number")));
    }

    #[tokio::test]
    async fn test_preset_collect_fails_fast() {
        let mut console = PresetConsole::new([("amount".to_string(), "many".to_string())]);
        let steps = [PromptStep::new("amount", "Enter amount: ", ValueKind::Number)];
        let mut params = Params::new();

        let err = collect(&mut console, &steps, &mut params).await.unwrap_err();
        assert!(matches!(err, PoolError::InvalidInput(_)));
        assert!(params.is_empty());
    }
}
