//! Advisory completion reporting.
//!
//! After a local win the program may be submitted to a remote service
//! that awards experience. The local verdict is authoritative: the
//! reward is informational and its failure never changes the win.

use crate::error::ReportError;
use crate::level::LevelId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reward metadata returned for a completed level.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionReward {
    /// Human-readable summary.
    pub message: String,
    /// Commands in the submitted program.
    pub commands_used: usize,
    /// Whether this beats the player's previous best.
    #[serde(default)]
    pub improved: Option<bool>,
    /// Whether this is the player's first clear of the level.
    #[serde(default)]
    pub first_completion: Option<bool>,
    /// Total experience awarded.
    #[serde(default)]
    pub xp_earned: Option<u64>,
    /// Experience before bonuses.
    #[serde(default)]
    pub base_xp: Option<u64>,
    /// Bonus for a short program.
    #[serde(default)]
    pub efficiency_bonus: Option<u64>,
    /// Any further bonus.
    #[serde(default)]
    pub xp_bonus: Option<u64>,
    /// The player's best program length for the level.
    #[serde(default)]
    pub best_commands: Option<usize>,
    /// The player's experience after this award.
    #[serde(default)]
    pub player_total_xp: Option<u64>,
}

impl CompletionReward {
    /// Create a reward with only the required fields.
    pub fn new(message: impl Into<String>, commands_used: usize) -> Self {
        Self {
            message: message.into(),
            commands_used,
            ..Default::default()
        }
    }
}

/// Submits winning programs.
///
/// Called only after a win, with the program's lower-case command
/// names. Not retried on failure.
#[async_trait]
pub trait CompletionReporter: Send + Sync {
    /// Report a completed level.
    async fn report(
        &self,
        level: LevelId,
        commands: Vec<String>,
    ) -> Result<CompletionReward, ReportError>;
}
