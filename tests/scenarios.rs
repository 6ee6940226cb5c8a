//! End-to-end experiment runs through the public API.

use evacuation_maze::app::{ExperimentSession, FrameInput, IntentSource, ScriptedInput};
use evacuation_maze::config::{ExperimentConfig, ExperimentMode, FireConfig};
use evacuation_maze::error::{GridError, LevelError};
use evacuation_maze::game::experiment::{ExperimentEvent, Phase};
use evacuation_maze::game::fire::FireState;
use evacuation_maze::game::keys::Intent;
use evacuation_maze::game::player::{MoveResult, Pose};
use evacuation_maze::maze::{FileLevelSource, Grid, LevelSource, parse_level};
use std::f32::consts::FRAC_PI_4;
use std::fs;

const DIAGONAL: &str = r#"[["D",1],[1,"A"]]"#;

fn frame(tick: i64) -> FrameInput {
    FrameInput {
        dt: 1.0 / 60.0,
        now_ms: 1_000_000 + tick * 16,
        fog_density: 0.0005,
    }
}

fn diagonal() -> Grid {
    parse_level(1, DIAGONAL).unwrap()
}

/// Turns to face the exit diagonal and holds forward.
fn head_for_exit(session: &mut ExperimentSession) {
    let turn = 3.0 * FRAC_PI_4;
    session.look(turn / session.config().movement.mouse_sensitivity);
    session.press(Intent::Forward);
}

/// Ticks until a phase change, returning every event seen.
fn run_until_phase_change(session: &mut ExperimentSession, from: i64) -> Vec<ExperimentEvent> {
    let mut events = Vec::new();
    for tick in from..from + 100 {
        let report = session.tick(frame(tick));
        let changed = report.phase_change().is_some();
        events.extend(report.events);
        if changed {
            return events;
        }
    }
    panic!("no phase change within 100 ticks");
}

/// A grid without spawn or exit is rejected at load time.
#[test]
fn test_grid_without_markers_is_rejected() {
    let err = parse_level(3, "[[1,1],[1,1]]").unwrap_err();
    assert!(matches!(
        err,
        LevelError::Invalid {
            level: 3,
            source: GridError::MissingSpawn
        }
    ));
}

/// Walking spawn to exit escapes exactly once after the warm-up.
#[test]
fn test_diagonal_escape() {
    let mut session =
        ExperimentSession::new(ExperimentConfig::default(), ExperimentMode::Minimap, diagonal());

    head_for_exit(&mut session);
    let warmup_events = run_until_phase_change(&mut session, 0);
    assert_eq!(
        warmup_events,
        vec![
            ExperimentEvent::PhaseChanged {
                from: Phase::Warmup,
                to: Phase::Formal
            },
            ExperimentEvent::LevelRequested { level: 1 },
        ]
    );

    session.complete_level_load(1, diagonal()).unwrap();
    assert_eq!(session.pose(), Pose::new(-100.0, -100.0, 0.0));

    head_for_exit(&mut session);
    let formal_events = run_until_phase_change(&mut session, 100);
    assert_eq!(
        formal_events,
        vec![ExperimentEvent::PhaseChanged {
            from: Phase::Formal,
            to: Phase::Escaped
        }]
    );

    for tick in 200..260 {
        assert!(session.tick(frame(tick)).events.is_empty());
    }
    assert_eq!(session.outcome(), Some(Phase::Escaped));
    assert!(!session.export().viewport.is_empty());
}

/// The fire first catches a nearby player once its radius passes the grace radius.
#[test]
fn test_fire_catches_after_grace() {
    let config = FireConfig {
        spread_rate: 0.15,
        grace_radius: 100.0,
    };
    let mut fire = FireState::ignite([0.0, 0.0], &config);
    let pose = Pose::new(30.0, 40.0, 0.0);

    for _ in 0..666 {
        fire.advance(1.0);
        assert!(!fire.evaluate_danger(&pose));
    }
    fire.advance(1.0);
    assert!((fire.radius - 100.05).abs() < 0.01);
    assert!(fire.evaluate_danger(&pose));
}

/// Idling through the whole warm-up forces the formal trial.
#[test]
fn test_warmup_timeout() {
    let mut session =
        ExperimentSession::new(ExperimentConfig::default(), ExperimentMode::Xray, diagonal());
    session.look(-250.0);
    assert!(session.pose().yaw > 0.0);

    for tick in 0..1800 {
        assert!(session.tick(frame(tick)).events.is_empty());
    }
    assert_eq!(session.phase(), Phase::Warmup);
    assert_eq!(session.warmup_timer(), 1800);

    let report = session.tick(frame(1800));
    assert_eq!(report.phase_change(), Some(Phase::Formal));
    assert_eq!(session.warmup_timer(), 0);
    assert_eq!(session.pose().yaw, 0.0);
    assert_eq!(session.pending_level(), Some(1));
}

/// A scripted run over level files on disk ends with a fire catch and keeps
/// its telemetry.
#[test]
fn test_scripted_run_from_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("maze3d-5.json"), DIAGONAL).unwrap();
    // Formal level with the exit sealed off behind a wall.
    fs::write(
        dir.path().join("maze3d-1.json"),
        r#"[["D",1,2,"A"],[1,1,2,1]]"#,
    )
    .unwrap();

    let mut levels = FileLevelSource::new(dir.path());
    let mut config = ExperimentConfig::default();
    config.phase.warmup_tick_limit = 10;
    config.fire.spread_rate = 600.0;
    let warmup = levels.load(config.phase.warmup_level).unwrap();
    let mut session = ExperimentSession::new(config, ExperimentMode::Minimap, warmup);

    let mut input = ScriptedInput::parse("0 gaze 100 100\n3 hover 1 1\n4 hover 9 9").unwrap();
    let mut outcome = None;
    for tick in 0..200u64 {
        let now = frame(tick as i64);
        for event in input.poll(tick) {
            session.handle_input(now.now_ms, event);
        }
        session.tick(now);
        session.load_pending_level(&mut levels).unwrap();
        if let Some(phase) = session.outcome() {
            outcome = Some(phase);
            break;
        }
    }

    assert_eq!(outcome, Some(Phase::Caught));
    assert_eq!(session.context().level, 1);
    let record = session.export();
    assert_eq!(record.eye.len(), 1);
    assert_eq!(record.minimap.hovers.len(), 1);
    assert!(record.viewport.len() >= 2);
    assert!(record.viewport.last().unwrap().fire_radius > 0.0);
}

/// The bundled demo script walks both bundled levels to their exits.
#[test]
fn test_bundled_demo_escapes() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut levels = FileLevelSource::new(root.join("assets/maps"));
    let mut input = ScriptedInput::from_file(root.join("demos/escape.txt")).unwrap();

    let config = ExperimentConfig::default();
    let warmup = levels.load(config.phase.warmup_level).unwrap();
    let mut session = ExperimentSession::new(config, ExperimentMode::Minimap, warmup);

    for tick in 0..600u64 {
        let now = frame(tick as i64);
        for event in input.poll(tick) {
            session.handle_input(now.now_ms, event);
        }
        session.tick(now);
        session.load_pending_level(&mut levels).unwrap();
        if session.outcome().is_some() {
            break;
        }
    }

    assert_eq!(session.outcome(), Some(Phase::Escaped));
    assert_eq!(session.context().level, 1);
    let record = session.export();
    assert_eq!(record.minimap.hovers.len(), 2);
    assert_eq!(record.eye.len(), 3);
}

/// A NaN pointer delta from an input script cannot push the player off the grid.
#[test]
fn test_nan_look_keeps_pose_finite() {
    let grid = parse_level(5, r#"[["D",2,2],[2,2,2],[2,2,"A"]]"#).unwrap();
    let mut session =
        ExperimentSession::new(ExperimentConfig::default(), ExperimentMode::Minimap, grid);
    let mut input = ScriptedInput::parse("0 look NaN\n0 press forward").unwrap();

    for event in input.poll(0) {
        session.handle_input(0, event);
    }
    let report = session.tick(frame(0));

    let pose = session.pose();
    assert!(pose.x.is_finite() && pose.z.is_finite() && pose.yaw.is_finite());
    assert_eq!(pose, Pose::new(-150.0, -150.0, 0.0));
    assert_eq!(report.moves, vec![(Intent::Forward, MoveResult::Blocked)]);
}
