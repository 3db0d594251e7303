//! Step-by-step iteration over a run.
//!
//! [`StepIterator`] applies one command per call to
//! [`next`](StepIterator::next), waiting [`STEP_DELAY`] first and then
//! polling the cancellation token. The sequence is finite and cannot
//! be restarted: after the terminal event every call returns `None`.

use std::sync::Arc;

use circuit_core::{
    ActivationSet, Command, EngineState, Grid, Position, RunResult, StepEvent,
};
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::config::STEP_DELAY;

/// One run in progress.
///
/// Owns a private copy of the program, so the caller's queue may change
/// while the run plays. Created via [`Engine::start_run`](crate::Engine::start_run).
#[derive(Debug)]
pub struct StepIterator {
    grid: Arc<Grid>,
    commands: Vec<Command>,
    next_index: usize,
    position: Position,
    activations: ActivationSet,
    cancel: CancellationToken,
    state: EngineState,
}

impl StepIterator {
    pub(crate) fn new(
        grid: Arc<Grid>,
        commands: Vec<Command>,
        start: Position,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            grid,
            commands,
            next_index: 0,
            position: start,
            activations: ActivationSet::new(),
            cancel,
            state: EngineState::Running,
        }
    }

    /// Advance the run by one command.
    ///
    /// Returns `None` once a terminal event has been returned. An empty
    /// program completes on the first call without waiting.
    ///
    /// Dropping the returned future while it waits leaves the run
    /// unchanged.
    pub async fn next(&mut self) -> Option<StepEvent> {
        if self.state.is_terminal() {
            return None;
        }

        let Some(&command) = self.commands.get(self.next_index) else {
            self.state = EngineState::Completed;
            return Some(StepEvent::Completed {
                position: self.position,
                activations: self.activations.clone(),
            });
        };

        tokio::time::sleep(STEP_DELAY).await;

        // Cancellation is polled only here, once the delay has elapsed.
        if self.cancel.is_cancelled() {
            self.state = EngineState::Cancelled;
            return Some(StepEvent::Cancelled {
                applied: self.next_index,
                position: self.position,
            });
        }

        let step = self.next_index;
        self.next_index += 1;
        Some(self.apply(step, command))
    }

    fn apply(&mut self, step: usize, command: Command) -> StepEvent {
        if command == Command::ActivateCircuit {
            if !self.grid.tile_at(self.position).is_circuit() {
                return StepEvent::ActivationIgnored {
                    step,
                    position: self.position,
                };
            }
            let cell = self.position.key();
            self.activations.insert(cell);
            return StepEvent::CircuitActivated {
                step,
                cell,
                activations: self.activations.clone(),
            };
        }

        let (d_row, d_col) = command.delta();
        let target =
            self.position
                .offset_clamped(d_row, d_col, self.grid.height(), self.grid.width());
        if self.grid.tile_at(target).is_obstacle() {
            return StepEvent::MoveBlocked {
                step,
                command,
                position: self.position,
                target,
            };
        }
        let from = std::mem::replace(&mut self.position, target);
        StepEvent::PositionChanged {
            step,
            command,
            from,
            to: target,
        }
    }

    /// Current robot position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Circuits activated so far.
    #[must_use]
    pub fn activations(&self) -> &ActivationSet {
        &self.activations
    }

    /// Lifecycle state: `Running` until the terminal event.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Commands applied so far.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.next_index
    }

    /// Commands in this run's program.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the program is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The result of a finished run, or `None` while it is running.
    #[must_use]
    pub fn result(&self) -> Option<RunResult> {
        match self.state {
            EngineState::Completed => Some(RunResult::Completed {
                activations: self.activations.clone(),
                position: self.position,
            }),
            EngineState::Cancelled => Some(RunResult::Cancelled),
            EngineState::Idle | EngineState::Running => None,
        }
    }

    /// The same event sequence as a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = StepEvent> + Send + 'static {
        futures::stream::unfold(self, |mut steps| async move {
            let event = steps.next().await?;
            Some((event, steps))
        })
    }
}
