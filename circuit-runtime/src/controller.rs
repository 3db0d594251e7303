//! The run controller.
//!
//! A [`RunController`] owns one level and the live state a presentation
//! layer renders from. At most one run is live at a time: starting a run
//! cancels the previous one and waits for it to stop, and a reset
//! restores the start state immediately while the cancelled task winds
//! down at its next step boundary.
//!
//! Every write a run makes to the live state is checked against that
//! run's cancellation token while the state's lock is held. A reset
//! cancels first and writes second, so no write from a cancelled run can
//! land after it. A run stopped through its own [`RunHandle`] is still
//! the live run, so it publishes [`EngineState::Cancelled`] on the way
//! out; a run retired by a reset or a newer start publishes nothing.

use std::fmt;
use std::sync::Arc;

use circuit_core::{
    evaluate, ActivationSet, CommandQueue, CompletionReporter, CompletionReward, EngineState,
    Level, LevelId, LevelSource, Outcome, Position, RunResult, StepEvent,
};
use circuit_engine::{Engine, StepIterator};
use circuit_hooks::ObserverRegistry;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::ControllerError;

/// Player-facing verdict shown alongside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// No finished run since the last reset.
    #[default]
    Playing,
    /// The last run activated every circuit.
    Won,
    /// The last run finished with circuits left inactive.
    Lost,
}

impl From<&Outcome> for GameStatus {
    fn from(outcome: &Outcome) -> Self {
        if outcome.is_won() {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }
}

/// Everything needed to draw the board at one instant.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveState {
    /// Level being played.
    pub level: LevelId,
    /// Robot position.
    pub position: Position,
    /// Circuits activated by the current run.
    pub activations: ActivationSet,
    /// Engine lifecycle of the current run.
    pub state: EngineState,
    /// Won/lost verdict of the last finished run.
    pub status: GameStatus,
    /// Commands applied by the current run.
    pub applied: usize,
    /// Reward for the last win, once the reporter answers.
    pub reward: Option<CompletionReward>,
}

impl LiveState {
    fn at_start(level: LevelId, position: Position) -> Self {
        Self {
            level,
            position,
            activations: ActivationSet::new(),
            state: EngineState::Idle,
            status: GameStatus::Playing,
            applied: 0,
            reward: None,
        }
    }

    fn apply(&mut self, event: &StepEvent, circuits: &ActivationSet) -> bool {
        match event {
            StepEvent::PositionChanged { step, to, .. } => {
                self.position = *to;
                self.applied = step + 1;
            }
            StepEvent::MoveBlocked { step, .. } | StepEvent::ActivationIgnored { step, .. } => {
                self.applied = step + 1;
            }
            StepEvent::CircuitActivated {
                step, activations, ..
            } => {
                self.activations = activations.clone();
                self.applied = step + 1;
            }
            StepEvent::Completed {
                position,
                activations,
            } => {
                self.position = *position;
                self.activations = activations.clone();
                self.state = EngineState::Completed;
                self.status = GameStatus::from(&evaluate(circuits, activations));
            }
            // Cancelled runs never write.
            _ => return false,
        }
        true
    }
}

/// How a controller run ended.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// The program ran to the end.
    Finished {
        /// Won or lost.
        outcome: Outcome,
        /// Final activation set.
        activations: ActivationSet,
        /// Final robot position.
        position: Position,
    },
    /// The run was cancelled by a reset, a newer run, or its handle.
    Cancelled,
}

impl RunReport {
    /// Whether this is the cancellation sentinel.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunReport::Cancelled)
    }

    /// Whether the run finished and won.
    pub fn is_won(&self) -> bool {
        matches!(self, RunReport::Finished { outcome, .. } if outcome.is_won())
    }
}

/// Handle to a spawned run.
///
/// Dropping the handle detaches the run; it keeps playing.
#[derive(Debug)]
pub struct RunHandle {
    task: JoinHandle<RunReport>,
    cancel: CancellationToken,
}

impl RunHandle {
    /// Ask the run to stop at its next step boundary.
    ///
    /// The live state is left where the run stopped; use
    /// [`RunController::reset`] to restore the start.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the run task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::TaskFailed`] if the run task panicked.
    pub async fn join(self) -> Result<RunReport, ControllerError> {
        self.task
            .await
            .map_err(|e| ControllerError::TaskFailed(e.to_string()))
    }
}

struct ActiveRun {
    // Parent of the run's cancellation token: cancelled when the run is
    // reset or superseded, not when its handle cancels it.
    retired: CancellationToken,
    finished: CancellationToken,
}

/// Sequences runs on one level and publishes their live state.
///
/// # Example
///
/// ```no_run
/// # async fn demo(level: circuit_core::Level) -> Result<(), circuit_runtime::ControllerError> {
/// use circuit_core::{Command, CommandQueue};
/// use circuit_engine::Engine;
/// use circuit_runtime::RunController;
///
/// let mut controller = RunController::new(Engine::default(), level);
/// let mut queue = CommandQueue::new(controller.level().max_commands);
/// queue.push(Command::Right).unwrap();
///
/// let report = controller.start(&queue).await?.join().await?;
/// println!("{report:?} {:?}", controller.snapshot().status);
/// # Ok(())
/// # }
/// ```
pub struct RunController {
    engine: Engine,
    level: Level,
    reporter: Option<Arc<dyn CompletionReporter>>,
    live: Arc<watch::Sender<LiveState>>,
    active: Option<ActiveRun>,
}

impl RunController {
    /// Create a controller for `level`, with the robot at its start.
    pub fn new(engine: Engine, level: Level) -> Self {
        let home = home_position(&level);
        let (live, _) = watch::channel(LiveState::at_start(level.id, home));
        Self {
            engine,
            level,
            reporter: None,
            live: Arc::new(live),
            active: None,
        }
    }

    /// Create a controller for the level `id` fetched from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Level`] if the source cannot supply it.
    pub async fn open(
        engine: Engine,
        source: &dyn LevelSource,
        id: LevelId,
    ) -> Result<Self, ControllerError> {
        let level = source.level(id).await?;
        Ok(Self::new(engine, level))
    }

    /// Report wins to `reporter`.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn CompletionReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// The level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The engine runs are executed on.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Start a run of `queue`.
    ///
    /// Any live run is cancelled first, and this waits for it to stop
    /// (at most one step delay) before the new run begins. The queue is
    /// copied; editing it afterwards does not affect the run.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::QueueTooLong`] if the queue exceeds the
    /// level's `max_commands`, or [`ControllerError::Engine`] if the
    /// engine rejects the start position. A rejected start leaves any
    /// live run untouched.
    pub async fn start(&mut self, queue: &CommandQueue) -> Result<RunHandle, ControllerError> {
        if queue.len() > self.level.max_commands {
            return Err(ControllerError::QueueTooLong {
                len: queue.len(),
                max: self.level.max_commands,
            });
        }
        let retired = CancellationToken::new();
        let cancel = retired.child_token();
        let steps = self.engine.start_run(
            queue,
            Arc::clone(&self.level.grid),
            self.level.start,
            &cancel,
        )?;

        self.stop_active().await;

        self.live.send_replace(LiveState {
            state: EngineState::Running,
            ..LiveState::at_start(self.level.id, steps.position())
        });

        let finished = CancellationToken::new();
        self.active = Some(ActiveRun {
            retired: retired.clone(),
            finished: finished.clone(),
        });

        tracing::info!(
            level = %self.level.id,
            commands = queue.len(),
            "circuit.controller.start"
        );

        let run = SpawnedRun {
            steps,
            observers: self.engine.observers().clone(),
            live: Arc::clone(&self.live),
            circuits: self.level.grid.circuit_cells(),
            cancel: cancel.clone(),
            retired,
            submission: self.reporter.as_ref().map(|reporter| Submission {
                reporter: Arc::clone(reporter),
                level: self.level.id,
                commands: queue.wire_names(),
            }),
            _finished: finished.drop_guard(),
        };
        let task = tokio::spawn(run.drive());

        Ok(RunHandle { task, cancel })
    }

    async fn stop_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.retired.cancel();
            active.finished.cancelled().await;
        }
    }

    /// Cancel any live run and put the robot back at the start.
    ///
    /// The live state is restored before this returns. The cancelled
    /// task stops at its next step boundary and its handle resolves to
    /// [`RunReport::Cancelled`]. The authoring queue is not touched.
    pub fn reset(&mut self) {
        if let Some(active) = &self.active {
            active.retired.cancel();
        }
        self.live
            .send_replace(LiveState::at_start(self.level.id, self.home()));
        tracing::debug!(level = %self.level.id, "circuit.controller.reset");
    }

    /// Switch to `level` and reset onto it.
    pub fn load_level(&mut self, level: Level) {
        tracing::info!(from = %self.level.id, to = %level.id, "circuit.controller.level");
        self.level = level;
        self.reset();
    }

    /// The current live state.
    pub fn snapshot(&self) -> LiveState {
        self.live.borrow().clone()
    }

    /// A receiver that observes every live-state change.
    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.live.subscribe()
    }

    /// Won/lost verdict of the last finished run.
    pub fn status(&self) -> GameStatus {
        self.live.borrow().status
    }

    /// Reward for the last win, if the reporter has answered.
    pub fn reward(&self) -> Option<CompletionReward> {
        self.live.borrow().reward.clone()
    }

    fn home(&self) -> Position {
        home_position(&self.level)
    }
}

impl fmt::Debug for RunController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunController")
            .field("engine", &self.engine)
            .field("level", &self.level.id)
            .field("reporter", &self.reporter.is_some())
            .field("live", &*self.live.borrow())
            .finish_non_exhaustive()
    }
}

// Where the robot is drawn between runs. Always on the grid, even when
// the engine would reject the level's start.
fn home_position(level: &Level) -> Position {
    level
        .start
        .clamped_to(level.grid.height(), level.grid.width())
}

struct Submission {
    reporter: Arc<dyn CompletionReporter>,
    level: LevelId,
    commands: Vec<String>,
}

struct SpawnedRun {
    steps: StepIterator,
    observers: ObserverRegistry,
    live: Arc<watch::Sender<LiveState>>,
    circuits: ActivationSet,
    cancel: CancellationToken,
    retired: CancellationToken,
    submission: Option<Submission>,
    _finished: DropGuard,
}

impl SpawnedRun {
    async fn drive(mut self) -> RunReport {
        while let Some(event) = self.steps.next().await {
            self.observers.dispatch(&event).await;
            let cancel = &self.cancel;
            let circuits = &self.circuits;
            self.live
                .send_if_modified(|state| !cancel.is_cancelled() && state.apply(&event, circuits));
        }

        let (activations, position) = match self.steps.result() {
            Some(RunResult::Completed {
                activations,
                position,
            }) if !self.cancel.is_cancelled() => (activations, position),
            _ => {
                tracing::debug!(applied = self.steps.applied(), "circuit.controller.cancelled");
                let retired = &self.retired;
                self.live.send_if_modified(|state| {
                    if retired.is_cancelled() {
                        return false;
                    }
                    state.state = EngineState::Cancelled;
                    true
                });
                return RunReport::Cancelled;
            }
        };

        let outcome = evaluate(&self.circuits, &activations);
        if outcome.is_won() {
            if let Some(submission) = self.submission.take() {
                tokio::spawn(submit(submission, Arc::clone(&self.live), self.cancel.clone()));
            }
        }

        RunReport::Finished {
            outcome,
            activations,
            position,
        }
    }
}

async fn submit(
    submission: Submission,
    live: Arc<watch::Sender<LiveState>>,
    cancel: CancellationToken,
) {
    let Submission {
        reporter,
        level,
        commands,
    } = submission;
    match reporter.report(level, commands).await {
        Ok(reward) => {
            tracing::info!(
                level = %level,
                xp = ?reward.xp_earned,
                "circuit.report.accepted"
            );
            live.send_if_modified(|state| {
                if cancel.is_cancelled() {
                    return false;
                }
                state.reward = Some(reward);
                true
            });
        }
        Err(error) => {
            tracing::warn!(level = %level, error = %error, "circuit.report.failed");
        }
    }
}
