//! Completion reporters with fixed behaviour.

use crate::error::ReportError;
use crate::level::LevelId;
use crate::report::{CompletionReporter, CompletionReward};
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns a fixed message and records every submission.
#[derive(Default)]
pub struct StaticReporter {
    submissions: Mutex<Vec<(LevelId, Vec<String>)>>,
}

impl StaticReporter {
    /// Create a reporter with no submissions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(level, commands)` reported so far.
    pub fn submissions(&self) -> Vec<(LevelId, Vec<String>)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionReporter for StaticReporter {
    async fn report(
        &self,
        level: LevelId,
        commands: Vec<String>,
    ) -> Result<CompletionReward, ReportError> {
        let used = commands.len();
        self.submissions.lock().unwrap().push((level, commands));
        Ok(CompletionReward::new("Level completed!", used))
    }
}

/// Always fails with [`ReportError::Unavailable`], counting attempts.
#[derive(Default)]
pub struct FailingReporter {
    attempts: Mutex<usize>,
}

impl FailingReporter {
    /// Create a reporter with no attempts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports attempted.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl CompletionReporter for FailingReporter {
    async fn report(
        &self,
        _level: LevelId,
        _commands: Vec<String>,
    ) -> Result<CompletionReward, ReportError> {
        *self.attempts.lock().unwrap() += 1;
        Err(ReportError::Unavailable("connection refused".into()))
    }
}
