//! What a run publishes while it plays, and how it ends.
//!
//! A run is a finite sequence of [`StepEvent`]s ending in exactly one
//! terminal event ([`StepEvent::Completed`] or [`StepEvent::Cancelled`]).
//! Events appear strictly in command order.

use crate::command::Command;
use crate::position::{ActivationSet, CellKey, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the execution engine for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No run in progress. Initial, and re-entered after a reset.
    #[default]
    Idle,
    /// Stepping through the queue.
    Running,
    /// Every command was applied.
    Completed,
    /// Stopped at a step boundary by cancellation.
    Cancelled,
}

impl EngineState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, EngineState::Completed | EngineState::Cancelled)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Idle => write!(f, "idle"),
            EngineState::Running => write!(f, "running"),
            EngineState::Completed => write!(f, "completed"),
            EngineState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One observable step of a run.
///
/// `step` is the zero-based index of the command that produced the
/// event.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    /// A movement command was applied. `from == to` when the robot
    /// bumped the grid edge.
    PositionChanged {
        /// Command index.
        step: usize,
        /// The movement command.
        command: Command,
        /// Position before the command.
        from: Position,
        /// Position after the command.
        to: Position,
    },
    /// A movement command targeted an obstacle and was absorbed.
    MoveBlocked {
        /// Command index.
        step: usize,
        /// The movement command.
        command: Command,
        /// Where the robot stays.
        position: Position,
        /// The obstacle cell.
        target: Position,
    },
    /// The robot activated the circuit it stands on.
    CircuitActivated {
        /// Command index.
        step: usize,
        /// The activated cell.
        cell: CellKey,
        /// The full set after this activation.
        activations: ActivationSet,
    },
    /// `ACTIVATE_CIRCUIT` was issued off a circuit; nothing changed.
    ActivationIgnored {
        /// Command index.
        step: usize,
        /// Where the robot stands.
        position: Position,
    },
    /// Every command was applied.
    Completed {
        /// Final robot position.
        position: Position,
        /// Final activation set.
        activations: ActivationSet,
    },
    /// The run stopped at a step boundary.
    Cancelled {
        /// Commands applied before cancellation.
        applied: usize,
        /// Robot position when the run stopped.
        position: Position,
    },
}

impl StepEvent {
    /// Whether this event ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepEvent::Completed { .. } | StepEvent::Cancelled { .. })
    }

    /// The command index, for per-step events.
    pub fn step(&self) -> Option<usize> {
        match self {
            StepEvent::PositionChanged { step, .. }
            | StepEvent::MoveBlocked { step, .. }
            | StepEvent::CircuitActivated { step, .. }
            | StepEvent::ActivationIgnored { step, .. } => Some(*step),
            StepEvent::Completed { .. } | StepEvent::Cancelled { .. } => None,
        }
    }

    /// Short dotted name, used as the log message.
    pub fn name(&self) -> &'static str {
        match self {
            StepEvent::PositionChanged { .. } => "circuit.step.moved",
            StepEvent::MoveBlocked { .. } => "circuit.step.blocked",
            StepEvent::CircuitActivated { .. } => "circuit.step.activated",
            StepEvent::ActivationIgnored { .. } => "circuit.step.ignored",
            StepEvent::Completed { .. } => "circuit.run.completed",
            StepEvent::Cancelled { .. } => "circuit.run.cancelled",
        }
    }
}

/// How a run ended.
///
/// `Cancelled` is the cancellation sentinel. It carries no activation
/// set, so a cancelled run cannot be handed to the outcome evaluator.
#[must_use = "a cancelled run must not be evaluated"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RunResult {
    /// Every command was applied.
    Completed {
        /// Final activation set.
        activations: ActivationSet,
        /// Final robot position.
        position: Position,
    },
    /// Stopped by cancellation.
    Cancelled,
}

impl RunResult {
    /// Whether this is the cancellation sentinel.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunResult::Cancelled)
    }

    /// The activation set of a completed run.
    pub fn activations(&self) -> Option<&ActivationSet> {
        match self {
            RunResult::Completed { activations, .. } => Some(activations),
            RunResult::Cancelled => None,
        }
    }
}
