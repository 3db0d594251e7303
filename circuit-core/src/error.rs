//! Error types for each boundary.

use crate::position::Position;
use thiserror::Error;

/// Grid construction errors. A [`crate::Grid`] that exists is always
/// rectangular, so these only surface at load time.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or no columns.
    #[error("grid is empty")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A flat tile list does not divide evenly into rows of `width`.
    #[error("{len} tiles cannot be reshaped into rows of width {width}")]
    Reshape {
        /// Number of tiles supplied.
        len: usize,
        /// Requested row width.
        width: usize,
    },

    /// The declared dimensions disagree with the tiles supplied.
    #[error("declared {declared_height}x{declared_width}, tiles form {height}x{width}")]
    DimensionMismatch {
        /// Declared row count.
        declared_height: usize,
        /// Declared column count.
        declared_width: usize,
        /// Row count of the tiles.
        height: usize,
        /// Column count of the tiles.
        width: usize,
    },
}

/// Command and queue construction errors.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The token is not one of the five known commands.
    #[error("unknown command token: {0:?}")]
    Unknown(String),

    /// The queue already holds `max` commands.
    #[error("command queue is full ({max} commands)")]
    QueueFull {
        /// The queue's limit.
        max: usize,
    },
}

/// Run-start precondition failures. Raised before any step executes.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The start position lies outside the grid.
    #[error("start position {start} is outside a {height}x{width} grid")]
    StartOutOfBounds {
        /// The rejected start position.
        start: Position,
        /// Grid row count.
        height: usize,
        /// Grid column count.
        width: usize,
    },
}

/// Level source errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LevelError {
    /// No level with that id.
    #[error("level not found: {0}")]
    NotFound(String),

    /// The level's grid is malformed.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    /// The level record could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Completion reporting errors. These never change a local win.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReportError {
    /// The reporting service rejected the submission.
    #[error("completion rejected: {0}")]
    Rejected(String),

    /// The reporting service could not be reached.
    #[error("completion service unavailable: {0}")]
    Unavailable(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Observer errors. These are logged but do NOT halt the run.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The observer failed to handle an event.
    #[error("observer failed: {0}")]
    Failed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
