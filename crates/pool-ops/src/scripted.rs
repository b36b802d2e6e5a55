//! Scripted console for tests and replayed sessions.

use std::collections::VecDeque;

use async_trait::async_trait;
use pool_types::{PoolError, Result};

use crate::console::Console;

/// Answers questions from a queue and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    asked: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Lines shown so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn ask(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front().ok_or(PoolError::InputClosed)
    }

    fn show(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
