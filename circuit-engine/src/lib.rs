#![deny(missing_docs)]
//! Program execution engine for circuit runs.
//!
//! The engine replays a [`circuit_core::CommandQueue`] against a
//! [`circuit_core::Grid`]: one command per [`STEP_DELAY`], clamping at
//! the edges, absorbing moves into obstacles, and collecting activated
//! circuits. Runs stop cooperatively at the next step boundary once
//! their [`CancellationToken`](tokio_util::sync::CancellationToken) is
//! cancelled.
//!
//! Three ways to drive a run:
//!
//! - [`Engine::run`] drives to the end and returns a [`circuit_core::RunResult`]
//! - [`Engine::start_run`] hands back a [`StepIterator`] to pull events one at a time
//! - [`Engine::run_stream`] spawns the run and returns a channel of events

pub mod config;
pub mod engine;
pub mod step;

pub use config::{EngineConfig, StartPolicy, STEP_DELAY};
pub use engine::Engine;
pub use step::StepIterator;
