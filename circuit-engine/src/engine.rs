//! Core Engine struct and run methods.

use std::sync::Arc;

use circuit_core::{
    CommandQueue, EngineError, Grid, Position, RunObserver, RunResult, StepEvent,
};
use circuit_hooks::ObserverRegistry;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::{EngineConfig, StartPolicy};
use crate::step::StepIterator;

/// The program stepper: replays command queues against grids.
///
/// An `Engine` holds no per-run state, so one engine can serve any
/// number of runs. Observers registered here see every run's events.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) observers: ObserverRegistry,
}

impl Engine {
    /// Create a new `Engine` with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            observers: ObserverRegistry::new(),
        }
    }

    /// Add an observer.
    ///
    /// Observers are called in order of registration for each event.
    pub fn add_observer(&mut self, observer: Arc<dyn RunObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Returns a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the observer pipeline.
    #[must_use]
    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    /// Validate the run's preconditions and return an iterator over its
    /// steps. Nothing is applied until [`StepIterator::next`] is called.
    ///
    /// The queue is copied here; later edits do not affect this run.
    /// The caller keeps a clone of `cancel` and cancels it to stop the
    /// run at its next step boundary.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StartOutOfBounds`] if `start` is outside
    /// the grid and the policy is [`StartPolicy::Reject`].
    pub fn start_run(
        &self,
        queue: &CommandQueue,
        grid: Arc<Grid>,
        start: Position,
        cancel: &CancellationToken,
    ) -> Result<StepIterator, EngineError> {
        let start = self.resolve_start(&grid, start)?;
        tracing::debug!(
            commands = queue.len(),
            start = %start,
            height = grid.height(),
            width = grid.width(),
            "circuit.run.start"
        );
        Ok(StepIterator::new(
            grid,
            queue.commands().to_vec(),
            start,
            cancel.clone(),
        ))
    }

    fn resolve_start(&self, grid: &Grid, start: Position) -> Result<Position, EngineError> {
        if grid.contains(start) {
            return Ok(start);
        }
        match self.config.start_policy {
            StartPolicy::Reject => Err(EngineError::StartOutOfBounds {
                start,
                height: grid.height(),
                width: grid.width(),
            }),
            StartPolicy::Clamp => {
                let clamped = start.clamped_to(grid.height(), grid.width());
                tracing::warn!(from = %start, to = %clamped, "circuit.run.start_clamped");
                Ok(clamped)
            }
        }
    }

    /// Run the program to completion.
    ///
    /// Every event is dispatched to the registered observers before the
    /// next step begins.
    ///
    /// Returns [`RunResult::Cancelled`] if `cancel` fires before the
    /// program is exhausted; otherwise the activation set and final
    /// position. An empty queue completes immediately.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the run's preconditions fail; see
    /// [`start_run`](Engine::start_run).
    pub async fn run(
        &self,
        queue: &CommandQueue,
        grid: Arc<Grid>,
        start: Position,
        cancel: &CancellationToken,
    ) -> Result<RunResult, EngineError> {
        let mut steps = self.start_run(queue, grid, start, cancel)?;
        while let Some(event) = steps.next().await {
            self.observers.dispatch(&event).await;
        }
        let result = steps.result().unwrap_or(RunResult::Cancelled);
        tracing::debug!(
            cancelled = result.is_cancelled(),
            applied = steps.applied(),
            "circuit.run.end"
        );
        Ok(result)
    }

    /// Spawn the run onto the tokio runtime and forward its events
    /// through a channel.
    ///
    /// Observers see each event before it is sent. The final event on
    /// the channel is always terminal. Dropping the receiver abandons
    /// the run at its next step.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the run's preconditions fail; see
    /// [`start_run`](Engine::start_run).
    pub fn run_stream(
        &self,
        queue: &CommandQueue,
        grid: Arc<Grid>,
        start: Position,
        cancel: &CancellationToken,
    ) -> Result<mpsc::Receiver<StepEvent>, EngineError> {
        let mut steps = self.start_run(queue, grid, start, cancel)?;
        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        let observers = self.observers.clone();

        tokio::spawn(async move {
            while let Some(event) = steps.next().await {
                observers.dispatch(&event).await;
                if tx.send(event).await.is_err() {
                    tracing::debug!(applied = steps.applied(), "circuit.run.abandoned");
                    break;
                }
            }
        });

        Ok(rx)
    }
}
