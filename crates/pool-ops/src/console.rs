//! Operator I/O.
//!
//! `StdConsole` talks to the terminal; `PresetConsole` answers prompt steps
//! from values given on the command line.

use std::collections::HashMap;
use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use pool_types::{PoolError, Result};

use crate::prompt::PromptStep;

#[async_trait]
pub trait Console: Send {
    /// Print `question` and wait for one line of input.
    async fn ask(&mut self, question: &str) -> Result<String>;

    /// Print one line of output.
    fn show(&mut self, line: &str);

    /// Answer for a typed prompt step.
    async fn answer(&mut self, step: &PromptStep) -> Result<String> {
        self.ask(step.question).await
    }

    /// Whether invalid answers can be re-asked.
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Interactive terminal on stdin/stdout.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn ask(&mut self, question: &str) -> Result<String> {
        print!("{}", question);
        let _ = std::io::stdout().flush();
        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(PoolError::InputClosed),
            Err(e) => Err(PoolError::Other(format!("failed to read stdin: {}", e))),
        }
    }

    fn show(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Non-interactive console answering steps by parameter key.
pub struct PresetConsole {
    values: HashMap<String, String>,
}

impl PresetConsole {
    pub fn new(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Console for PresetConsole {
    async fn ask(&mut self, question: &str) -> Result<String> {
        Err(PoolError::InvalidInput(format!(
            "no interactive input available for {:?}",
            question.trim()
        )))
    }

    fn show(&mut self, line: &str) {
        println!("{}", line);
    }

    async fn answer(&mut self, step: &PromptStep) -> Result<String> {
        self.values
            .get(step.key)
            .cloned()
            .ok_or_else(|| PoolError::InvalidInput(format!("missing --set {}=<value>", step.key)))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
