//! # circuit-core — shared vocabulary for the circuit program runner
//!
//! This crate defines the data model every other crate agrees on, plus
//! the collaborator traits the execution engine is driven by and
//! reports to.
//!
//! ## The Model
//!
//! | Concept | Type | What it is |
//! |---------|------|-----------|
//! | Grid Model | [`Grid`], [`Tile`], [`TileKind`], [`TilePalette`] | Rectangular tile matrix, classified once at load |
//! | Command Queue | [`Command`], [`CommandQueue`] | Bounded, ordered program |
//! | Run state | [`Position`], [`CellKey`], [`ActivationSet`] | Robot position and activated circuits |
//! | Step events | [`StepEvent`], [`RunResult`] | What a run publishes, and how it ends |
//! | Outcome | [`Outcome`], [`evaluate`] | Won/lost classification of a finished run |
//!
//! ## The Collaborators
//!
//! | Trait | What it does |
//! |-------|-------------|
//! | [`RunObserver`] | Observes step events (presentation, logging) |
//! | [`LevelSource`] | Supplies levels (local pack or remote service) |
//! | [`CompletionReporter`] | Advisory reward reporting after a win |
//!
//! Collaborator traits use `async-trait` so they stay dyn-compatible
//! behind `Arc<dyn _>`.

#![deny(missing_docs)]

pub mod command;
pub mod error;
pub mod event;
pub mod grid;
pub mod level;
pub mod observer;
pub mod outcome;
pub mod position;
pub mod report;
pub mod tile;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use command::{Command, CommandQueue};
pub use error::{CommandError, EngineError, GridError, LevelError, ObserverError, ReportError};
pub use event::{EngineState, RunResult, StepEvent};
pub use grid::Grid;
pub use level::{Level, LevelId, LevelSource};
pub use observer::RunObserver;
pub use outcome::{evaluate, Outcome};
pub use position::{ActivationSet, CellKey, Position};
pub use report::{CompletionReporter, CompletionReward};
pub use tile::{Tile, TileId, TileKind, TilePalette};
