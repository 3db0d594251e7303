#![deny(missing_docs)]
//! # circuit — umbrella crate
//!
//! Single import surface for the circuit program runner. Re-exports the
//! member crates behind feature flags, plus a `prelude` for the happy
//! path: load a level, queue a program, run it, read the verdict.

#[cfg(feature = "core")]
pub use circuit_core;
#[cfg(feature = "engine")]
pub use circuit_engine;
#[cfg(feature = "engine")]
pub use circuit_hooks;
#[cfg(feature = "levels")]
pub use circuit_levels;
#[cfg(feature = "runtime")]
pub use circuit_runtime;

/// Happy-path imports for playing circuit levels.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use circuit_core::{
        evaluate, ActivationSet, CellKey, Command, CommandQueue, CompletionReporter,
        CompletionReward, EngineState, Grid, Level, LevelId, LevelSource, Outcome, Position,
        RunObserver, RunResult, StepEvent, TileKind, TilePalette,
    };

    #[cfg(feature = "engine")]
    pub use circuit_engine::{Engine, EngineConfig, StartPolicy, StepIterator, STEP_DELAY};

    #[cfg(feature = "engine")]
    pub use circuit_hooks::ObserverRegistry;

    #[cfg(feature = "runtime")]
    pub use circuit_runtime::{
        ControllerError, GameStatus, LiveState, RunController, RunHandle, RunReport,
        TracingObserver,
    };

    #[cfg(feature = "levels")]
    pub use circuit_levels::{MemoryLevelSource, TileCatalogue};
}
