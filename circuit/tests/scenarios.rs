//! End-to-end play through the umbrella crate.

use std::sync::Arc;

use circuit::prelude::*;
use circuit_core::test_utils::{ascii_level, RecordingObserver, StaticReporter};
use circuit_core::CommandError;

fn program(tokens: &[&str], max: usize) -> CommandQueue {
    CommandQueue::parse(tokens, max).unwrap()
}

async fn play(level: Level, queue: &CommandQueue) -> (RunReport, LiveState) {
    let mut controller = RunController::new(Engine::default(), level);
    let report = controller.start(queue).await.unwrap().join().await.unwrap();
    (report, controller.snapshot())
}

fn scenario_board() -> Level {
    ascii_level(&["..C", "...", "..."], Position::new(0, 0), 8)
}

// --- Scenarios ---

#[tokio::test(start_paused = true)]
async fn scenario_a_win() {
    let (report, live) = play(
        scenario_board(),
        &program(&["RIGHT", "RIGHT", "ACTIVATE_CIRCUIT"], 8),
    )
    .await;

    assert!(report.is_won());
    assert_eq!(live.status, GameStatus::Won);
    assert_eq!(live.activations.keys(), vec!["0-2"]);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_loss() {
    let (report, live) = play(scenario_board(), &program(&["RIGHT", "ACTIVATE_CIRCUIT"], 8)).await;

    assert!(!report.is_won());
    assert!(live.activations.is_empty());
    assert_eq!(live.status, GameStatus::Lost);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_obstacle() {
    let level = ascii_level(&[".#", ".."], Position::new(0, 0), 4);
    let (report, live) = play(level, &program(&["RIGHT", "RIGHT"], 4)).await;

    match report {
        RunReport::Finished { position, .. } => assert_eq!(position, Position::new(0, 0)),
        RunReport::Cancelled => panic!("run was cancelled"),
    }
    assert_eq!(live.applied, 2);
}

#[tokio::test(start_paused = true)]
async fn scenario_d_clamp() {
    let (_, live) = play(scenario_board(), &program(&["UP", "LEFT"], 8)).await;

    assert_eq!(live.position, Position::new(0, 0));
    assert_eq!(live.status, GameStatus::Lost);
}

#[tokio::test(start_paused = true)]
async fn empty_board_without_circuits_wins_on_empty_program() {
    let level = ascii_level(&["..", ".."], Position::new(1, 1), 4);
    let (report, live) = play(level, &CommandQueue::new(4)).await;

    assert!(report.is_won());
    assert_eq!(live.position, Position::new(1, 1));
}

// --- Authoring ---

#[test]
fn unknown_tokens_fail_at_queue_build() {
    let err = CommandQueue::parse(&["UP", "TELEPORT"], 4).unwrap_err();
    assert_eq!(err, CommandError::Unknown("TELEPORT".into()));
}

#[test]
fn gaps_collapse_and_limit_change_clears() {
    let mut queue = CommandQueue::from_slots(
        &[Some(Command::Up), None, Some(Command::ActivateCircuit)],
        3,
    )
    .unwrap();
    assert_eq!(queue.commands(), &[Command::Up, Command::ActivateCircuit]);

    queue.set_max_commands(5);
    assert!(queue.is_empty());
    assert_eq!(queue.max_commands(), 5);
}

// --- Bundled levels ---

#[tokio::test(start_paused = true)]
async fn bundled_levels_are_solvable() {
    let source = MemoryLevelSource::bundled().unwrap();
    let solutions: [(u64, &[&str]); 3] = [
        (1, &["RIGHT", "RIGHT", "ACTIVATE_CIRCUIT"]),
        (
            2,
            &[
                "DOWN", "DOWN", "DOWN", "ACTIVATE_CIRCUIT", "UP", "RIGHT", "RIGHT", "RIGHT", "UP",
                "UP", "ACTIVATE_CIRCUIT",
            ],
        ),
        (
            3,
            &[
                "UP", "UP", "LEFT", "LEFT", "ACTIVATE_CIRCUIT", "RIGHT", "RIGHT", "RIGHT", "RIGHT",
                "ACTIVATE_CIRCUIT", "LEFT", "LEFT", "DOWN", "DOWN", "LEFT", "LEFT", "DOWN", "DOWN",
                "ACTIVATE_CIRCUIT", "RIGHT", "RIGHT", "RIGHT", "RIGHT", "ACTIVATE_CIRCUIT",
            ],
        ),
    ];

    for (id, tokens) in solutions {
        let mut controller = RunController::open(Engine::default(), &source, LevelId(id))
            .await
            .unwrap();
        let queue = program(tokens, controller.level().max_commands);
        let report = controller.start(&queue).await.unwrap().join().await.unwrap();
        assert!(report.is_won(), "level {id}: {report:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn win_on_bundled_level_is_reported_and_observed() {
    let source = MemoryLevelSource::bundled().unwrap();
    let observer = Arc::new(RecordingObserver::new());
    let reporter = Arc::new(StaticReporter::new());
    let mut engine = Engine::default();
    engine.add_observer(observer.clone());
    engine.add_observer(Arc::new(TracingObserver::new()));

    let mut controller = RunController::open(engine, &source, LevelId(1))
        .await
        .unwrap()
        .with_reporter(reporter.clone());
    let mut live = controller.subscribe();

    let queue = program(&["RIGHT", "RIGHT", "ACTIVATE_CIRCUIT"], 5);
    controller.start(&queue).await.unwrap().join().await.unwrap();
    live.wait_for(|s| s.reward.is_some()).await.unwrap();

    let events = observer.events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[2], StepEvent::CircuitActivated { .. }));
    assert!(events[3].is_terminal());

    let submissions = reporter.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0, LevelId(1));
    assert_eq!(
        submissions[0].1,
        vec!["right", "right", "activate_circuit"]
    );
}
