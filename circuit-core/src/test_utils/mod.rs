//! In-memory helpers for testing.
//!
//! Available behind the `test-utils` feature flag.

mod grids;
mod recording_observer;
mod reporters;

pub use grids::{ascii_grid, ascii_level};
pub use recording_observer::RecordingObserver;
pub use reporters::{FailingReporter, StaticReporter};
