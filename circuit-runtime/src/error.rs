//! Controller errors.

use circuit_core::{EngineError, LevelError};
use thiserror::Error;

/// Errors raised by the [`RunController`](crate::RunController).
///
/// Cancellation is not an error; see [`RunReport::Cancelled`](crate::RunReport::Cancelled).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The engine refused to start the run.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The queue holds more commands than the level allows.
    #[error("queue holds {len} commands, level allows {max}")]
    QueueTooLong {
        /// Commands in the queue.
        len: usize,
        /// The level's `max_commands`.
        max: usize,
    },

    /// The level could not be loaded.
    #[error(transparent)]
    Level(#[from] LevelError),

    /// The run task panicked or was aborted.
    #[error("run task failed: {0}")]
    TaskFailed(String),
}
