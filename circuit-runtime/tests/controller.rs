//! Integration tests for the run controller.

use std::sync::Arc;
use std::time::Duration;

use circuit_core::test_utils::{ascii_level, FailingReporter, StaticReporter};
use circuit_core::{Command, CommandQueue, EngineState, Level, LevelId, Outcome, Position};
use circuit_engine::{Engine, EngineConfig, StartPolicy, STEP_DELAY};
use circuit_levels::MemoryLevelSource;
use circuit_runtime::{ControllerError, GameStatus, RunController, RunReport, TracingObserver};

// ============================================================================
// Helpers
// ============================================================================

fn scenario_level() -> Level {
    ascii_level(&["..C", "...", "..."], Position::new(0, 0), 8)
}

fn queue(cmds: &[Command]) -> CommandQueue {
    let mut q = CommandQueue::new(8);
    for cmd in cmds {
        q.push(*cmd).unwrap();
    }
    q
}

fn long_queue() -> CommandQueue {
    queue(&[
        Command::Down,
        Command::Down,
        Command::Right,
        Command::Right,
        Command::Up,
    ])
}

fn winning_queue() -> CommandQueue {
    queue(&[Command::Right, Command::Right, Command::ActivateCircuit])
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ============================================================================
// Run lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn winning_run_sets_status_won() {
    let mut controller = RunController::new(Engine::default(), scenario_level());

    let report = controller.start(&winning_queue()).await.unwrap().join().await.unwrap();

    assert!(report.is_won());
    let live = controller.snapshot();
    assert_eq!(live.status, GameStatus::Won);
    assert_eq!(live.state, EngineState::Completed);
    assert_eq!(live.position, Position::new(0, 2));
    assert_eq!(live.applied, 3);
    assert_eq!(live.activations.keys(), vec!["0-2"]);
}

#[tokio::test(start_paused = true)]
async fn short_run_sets_status_lost() {
    let mut controller = RunController::new(Engine::default(), scenario_level());

    let report = controller
        .start(&queue(&[Command::Right, Command::ActivateCircuit]))
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    match report {
        RunReport::Finished {
            outcome: Outcome::Lost { missing },
            position,
            ..
        } => {
            assert_eq!(missing.keys(), vec!["0-2"]);
            assert_eq!(position, Position::new(0, 1));
        }
        other => panic!("expected a loss, got {other:?}"),
    }
    assert_eq!(controller.status(), GameStatus::Lost);
}

#[tokio::test(start_paused = true)]
async fn snapshot_tracks_steps_mid_run() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let handle = controller.start(&long_queue()).await.unwrap();

    let live = controller.snapshot();
    assert_eq!(live.state, EngineState::Running);
    assert_eq!(live.applied, 0);

    tokio::time::sleep(STEP_DELAY + Duration::from_millis(50)).await;
    let live = controller.snapshot();
    assert_eq!(live.position, Position::new(1, 0));
    assert_eq!(live.applied, 1);
    assert_eq!(live.status, GameStatus::Playing);

    assert!(!handle.join().await.unwrap().is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_final_state() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let mut rx = controller.subscribe();

    let _handle = controller.start(&winning_queue()).await.unwrap();

    let state = rx
        .wait_for(|s| s.state == EngineState::Completed)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.status, GameStatus::Won);
}

// ============================================================================
// Reset and overlap
// ============================================================================

#[tokio::test(start_paused = true)]
async fn reset_mid_run_returns_cancelled() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let handle = controller.start(&long_queue()).await.unwrap();

    tokio::time::sleep(STEP_DELAY * 2 + Duration::from_millis(100)).await;
    assert_eq!(controller.snapshot().position, Position::new(2, 0));

    controller.reset();
    let live = controller.snapshot();
    assert_eq!(live.position, Position::new(0, 0));
    assert_eq!(live.state, EngineState::Idle);
    assert_eq!(live.applied, 0);

    assert_eq!(handle.join().await.unwrap(), RunReport::Cancelled);

    // Nothing from the cancelled run lands after the reset.
    settle().await;
    assert_eq!(controller.snapshot(), live);
}

#[tokio::test(start_paused = true)]
async fn reset_after_win_returns_to_playing() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    controller.start(&winning_queue()).await.unwrap().join().await.unwrap();
    assert_eq!(controller.status(), GameStatus::Won);

    controller.reset();

    let live = controller.snapshot();
    assert_eq!(live.status, GameStatus::Playing);
    assert!(live.activations.is_empty());
    assert_eq!(live.position, Position::new(0, 0));
}

#[tokio::test(start_paused = true)]
async fn handle_cancel_stops_run() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let handle = controller.start(&long_queue()).await.unwrap();

    handle.cancel();

    assert!(handle.join().await.unwrap().is_cancelled());
    let live = controller.snapshot();
    assert_eq!(live.applied, 0);
    assert_eq!(live.state, EngineState::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn handle_cancel_mid_run_keeps_board_and_publishes_cancelled() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let mut rx = controller.subscribe();
    let handle = controller.start(&long_queue()).await.unwrap();

    tokio::time::sleep(STEP_DELAY + Duration::from_millis(50)).await;
    handle.cancel();
    assert_eq!(handle.join().await.unwrap(), RunReport::Cancelled);

    let live = rx
        .wait_for(|s| s.state == EngineState::Cancelled)
        .await
        .unwrap()
        .clone();
    assert_eq!(live.applied, 1);
    assert_eq!(live.position, Position::new(1, 0));
    assert_eq!(live.status, GameStatus::Playing);

    controller.reset();
    assert_eq!(controller.snapshot().state, EngineState::Idle);
    assert_eq!(controller.snapshot().position, Position::new(0, 0));
}

#[tokio::test(start_paused = true)]
async fn superseded_run_does_not_publish_cancelled() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let first = controller.start(&long_queue()).await.unwrap();
    tokio::time::sleep(STEP_DELAY + Duration::from_millis(50)).await;

    controller.reset();
    assert_eq!(first.join().await.unwrap(), RunReport::Cancelled);
    settle().await;
    assert_eq!(controller.snapshot().state, EngineState::Idle);

    let second = controller.start(&long_queue()).await.unwrap();
    let _third = controller.start(&winning_queue()).await.unwrap();
    assert_eq!(second.join().await.unwrap(), RunReport::Cancelled);
    assert_eq!(controller.snapshot().state, EngineState::Running);
}

#[tokio::test(start_paused = true)]
async fn new_run_cancels_previous_and_waits() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let first = controller.start(&long_queue()).await.unwrap();

    tokio::time::sleep(STEP_DELAY + Duration::from_millis(100)).await;
    let second = controller.start(&winning_queue()).await.unwrap();

    assert_eq!(first.join().await.unwrap(), RunReport::Cancelled);

    let live = controller.snapshot();
    assert_eq!(live.position, Position::new(0, 0));
    assert_eq!(live.state, EngineState::Running);

    assert!(second.join().await.unwrap().is_won());
    assert_eq!(controller.snapshot().position, Position::new(0, 2));
}

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn queue_longer_than_level_limit_is_rejected() {
    let level = ascii_level(&["..C"], Position::new(0, 0), 2);
    let mut controller = RunController::new(Engine::default(), level);

    let err = controller.start(&winning_queue()).await.unwrap_err();

    assert!(matches!(err, ControllerError::QueueTooLong { len: 3, max: 2 }));
    assert_eq!(controller.snapshot().state, EngineState::Idle);
}

#[tokio::test(start_paused = true)]
async fn rejected_start_leaves_live_run_alone() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let first = controller.start(&winning_queue()).await.unwrap();

    let mut oversized = CommandQueue::new(12);
    for _ in 0..9 {
        oversized.push(Command::Up).unwrap();
    }
    let err = controller.start(&oversized).await.unwrap_err();
    assert!(matches!(err, ControllerError::QueueTooLong { len: 9, max: 8 }));

    assert!(first.join().await.unwrap().is_won());
    assert_eq!(controller.status(), GameStatus::Won);
}

#[tokio::test(start_paused = true)]
async fn out_of_bounds_start_is_rejected() {
    let mut level = scenario_level();
    level.start = Position::new(9, 9);
    let mut controller = RunController::new(Engine::default(), level);
    assert_eq!(controller.snapshot().position, Position::new(2, 2));

    let err = controller.start(&winning_queue()).await.unwrap_err();

    assert!(matches!(err, ControllerError::Engine(_)));
    assert_eq!(controller.snapshot().state, EngineState::Idle);

    controller.reset();
    assert_eq!(controller.snapshot().position, Position::new(2, 2));
}

#[tokio::test(start_paused = true)]
async fn clamp_policy_moves_home_into_grid() {
    let mut level = scenario_level();
    level.start = Position::new(5, 5);
    let engine = Engine::new(EngineConfig {
        start_policy: StartPolicy::Clamp,
        ..Default::default()
    });
    let mut controller = RunController::new(engine, level);
    assert_eq!(controller.snapshot().position, Position::new(2, 2));

    let report = controller
        .start(&queue(&[Command::Up, Command::Up, Command::ActivateCircuit]))
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    assert!(report.is_won());
}

// ============================================================================
// Completion reporting
// ============================================================================

#[tokio::test(start_paused = true)]
async fn win_is_reported_with_wire_names() {
    let reporter = Arc::new(StaticReporter::new());
    let mut controller =
        RunController::new(Engine::default(), scenario_level()).with_reporter(reporter.clone());
    let mut rx = controller.subscribe();

    controller.start(&winning_queue()).await.unwrap().join().await.unwrap();

    let reward = rx
        .wait_for(|s| s.reward.is_some())
        .await
        .unwrap()
        .reward
        .clone()
        .unwrap();
    assert_eq!(reward.commands_used, 3);
    assert_eq!(
        reporter.submissions(),
        vec![(
            LevelId(1),
            vec![
                "right".to_string(),
                "right".to_string(),
                "activate_circuit".to_string()
            ]
        )]
    );
    assert_eq!(controller.reward(), Some(reward));
}

#[tokio::test(start_paused = true)]
async fn reporter_failure_keeps_win() {
    let reporter = Arc::new(FailingReporter::new());
    let mut controller =
        RunController::new(Engine::default(), scenario_level()).with_reporter(reporter.clone());

    let report = controller.start(&winning_queue()).await.unwrap().join().await.unwrap();
    settle().await;

    assert!(report.is_won());
    assert_eq!(reporter.attempts(), 1);
    assert_eq!(controller.status(), GameStatus::Won);
    assert_eq!(controller.reward(), None);
}

#[tokio::test(start_paused = true)]
async fn loss_is_not_reported() {
    let reporter = Arc::new(StaticReporter::new());
    let mut controller =
        RunController::new(Engine::default(), scenario_level()).with_reporter(reporter.clone());

    controller
        .start(&queue(&[Command::Right]))
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    settle().await;

    assert!(reporter.submissions().is_empty());
    assert_eq!(controller.status(), GameStatus::Lost);
}

// ============================================================================
// Levels
// ============================================================================

#[tokio::test(start_paused = true)]
async fn open_fetches_level_from_source() {
    let source = MemoryLevelSource::from_levels([scenario_level()]);

    let controller = RunController::open(Engine::default(), &source, LevelId(1))
        .await
        .unwrap();
    assert_eq!(controller.level().name, "test level");

    let err = RunController::open(Engine::default(), &source, LevelId(7))
        .await
        .unwrap_err();
    assert!(matches!(err, ControllerError::Level(_)));
}

#[tokio::test(start_paused = true)]
async fn load_level_resets_onto_new_board() {
    let mut controller = RunController::new(Engine::default(), scenario_level());
    let handle = controller.start(&long_queue()).await.unwrap();
    tokio::time::sleep(STEP_DELAY + Duration::from_millis(10)).await;

    let mut next = ascii_level(&["C.", ".."], Position::new(1, 1), 4);
    next.id = LevelId(2);
    controller.load_level(next);

    let live = controller.snapshot();
    assert_eq!(live.level, LevelId(2));
    assert_eq!(live.position, Position::new(1, 1));
    assert_eq!(live.state, EngineState::Idle);
    assert_eq!(handle.join().await.unwrap(), RunReport::Cancelled);
    settle().await;
    assert_eq!(controller.snapshot(), live);

    let report = controller
        .start(&queue(&[Command::Up, Command::Left, Command::ActivateCircuit]))
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    assert!(report.is_won());
}

#[tokio::test(start_paused = true)]
async fn tracing_observer_does_not_disturb_run() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let mut engine = Engine::default();
    engine.add_observer(Arc::new(TracingObserver::new()));
    let mut controller = RunController::new(engine, scenario_level());

    let report = controller.start(&winning_queue()).await.unwrap().join().await.unwrap();
    assert!(report.is_won());
}
