use std::path::PathBuf;

use tui_blockfall::core::Session;
use tui_blockfall::types::InputEvent;
use tui_blockfall::{Replay, ReplayError, ReplayRecorder};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{}.json", name, std::process::id()))
}

/// Drive a live session and a recorder side by side.
fn play_live(seed: u32, steps: usize) -> (Session, Replay) {
    let pattern = [
        InputEvent::None,
        InputEvent::MoveLeft,
        InputEvent::None,
        InputEvent::Rotate,
        InputEvent::None,
        InputEvent::None,
        InputEvent::SoftDrop,
        InputEvent::MoveRight,
        InputEvent::MoveRight,
        InputEvent::SoftDrop,
        InputEvent::SoftDrop,
    ];

    let mut session = Session::standard(seed);
    let mut recorder = ReplayRecorder::new(Replay::standard(seed));
    for i in 0..steps {
        let ev = pattern[i % pattern.len()];
        recorder.record(ev);
        session.step(ev);
    }
    (session, recorder.finish())
}

#[test]
fn replay_reproduces_live_game() {
    let (live, replay) = play_live(2718, 1_500);
    let replayed = replay.play().unwrap();

    assert_eq!(replayed.board(), live.board());
    assert_eq!(replayed.active(), live.active());
    assert_eq!(replayed.next(), live.next());
    assert_eq!(replayed.score(), live.score());
    assert_eq!(replayed.level(), live.level());
    assert_eq!(replayed.game_over(), live.game_over());
}

#[test]
fn replay_survives_save_and_load() {
    let (live, replay) = play_live(161, 400);
    let path = temp_path("roundtrip");

    replay.save(&path).unwrap();
    let loaded = Replay::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, replay);
    assert_eq!(loaded.play().unwrap().board(), live.board());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Replay::load(temp_path("does-not-exist")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn garbage_is_a_format_error() {
    let err = Replay::from_json("{\"seed\": \"nope\"}").unwrap_err();
    assert!(matches!(err, ReplayError::Json(_)));
}
