//! Configuration types for the execution engine.

use std::time::Duration;

/// Pause before each command takes effect.
///
/// Fixed pacing so observers see a steady per-step cadence. Not part
/// of [`EngineConfig`].
pub const STEP_DELAY: Duration = Duration::from_millis(400);

/// What to do with a start position outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPolicy {
    /// Refuse to start the run.
    #[default]
    Reject,
    /// Clamp the start into the grid and run.
    Clamp,
}

/// Configuration for the execution engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Handling of out-of-bounds start positions.
    pub start_policy: StartPolicy,
    /// Capacity of the channel returned by
    /// [`Engine::run_stream`](crate::Engine::run_stream).
    pub event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_policy: StartPolicy::Reject,
            event_buffer: 64,
        }
    }
}
