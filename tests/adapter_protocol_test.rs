//! Headless protocol tests - full sessions over in-memory pipes

mod common;

use std::io::Cursor;

use common::{game_at, init_test_logging};
use tui_2048::adapter::{run, ErrorCode, Response, Session};
use tui_2048::core::{Game, GameConfig, MemoryStore, ScriptedRng};
use tui_2048::types::GameState;

fn run_lines<R: tui_2048::core::RandomSource>(session: &mut Session<R>, input: &str) -> Vec<Response> {
    let mut out = Vec::new();
    let written = run(session, Cursor::new(input.as_bytes()), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let responses: Vec<Response> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len() as u64, written);
    responses
}

fn scripted_session() -> Session<ScriptedRng> {
    let mut rng = ScriptedRng::default();
    rng.push_spawn(0, false).push_spawn(0, false);
    Session::new(Game::new(rng, MemoryStore::new()))
}

#[test]
fn test_session_starts_with_snapshot_and_answers_every_line() {
    init_test_logging();
    let mut session = scripted_session();
    let input = concat!(
        r#"{"type":"move","direction":"left"}"#, "\n",
        "\n",
        r#"{"type":"move","direction":"bogus"}"#, "\n",
        "garbage\n",
        r#"{"type":"snapshot"}"#, "\n",
    );
    let responses = run_lines(&mut session, input);
    assert_eq!(responses.len(), 5);

    let seqs: Vec<u64> = responses.iter().map(Response::seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4, 5]);

    match &responses[0] {
        Response::Snapshot(m) => {
            assert_eq!(m.state, GameState::Idle);
            assert_eq!(m.grid[0][0], Some(2));
            assert_eq!(m.grid[0][1], Some(2));
        }
        other => panic!("Expected snapshot, got {other:?}"),
    }
    match &responses[1] {
        Response::Snapshot(m) => {
            assert!(m.moved);
            assert_eq!(m.score, 4);
            assert_eq!(m.grid[0][0], Some(4));
        }
        other => panic!("Expected snapshot, got {other:?}"),
    }
    assert!(matches!(&responses[2], Response::Error(m) if m.code == ErrorCode::InvalidDirection));
    assert!(matches!(&responses[3], Response::Error(m) if m.code == ErrorCode::BadRequest));
    // Errors did not disturb the session.
    match (&responses[1], &responses[4]) {
        (Response::Snapshot(a), Response::Snapshot(b)) => {
            assert_eq!(a.grid, b.grid);
            assert_eq!(a.score, b.score);
        }
        other => panic!("Expected snapshots, got {other:?}"),
    }
}

#[test]
fn test_numeric_direction_codes() {
    let mut session = scripted_session();
    // 2 = left
    let responses = run_lines(&mut session, "{\"type\":\"move\",\"direction\":2}\n");
    assert!(matches!(&responses[1], Response::Snapshot(m) if m.score == 4));

    let input = concat!(
        r#"{"type":"move","direction":9}"#, "\n",
        r#"{"type":"move","direction":256}"#, "\n",
        r#"{"type":"move","direction":-1}"#, "\n",
    );
    let responses = run_lines(&mut session, input);
    for resp in &responses[1..] {
        assert!(matches!(resp, Response::Error(m) if m.code == ErrorCode::InvalidDirection));
    }
    assert_eq!(responses.len(), 4);
}

#[test]
fn test_win_continue_and_loss_codes() {
    let game = game_at([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], 0, &[]);
    let mut session = Session::new(game);
    let input = concat!(
        r#"{"type":"continue"}"#, "\n",
        r#"{"type":"move","direction":"l"}"#, "\n",
        r#"{"type":"continue"}"#, "\n",
        r#"{"type":"restore","grid":[[2,4,2,4],[4,2,4,2],[2,4,2,4],[4,2,4,2]],"score":10}"#, "\n",
        r#"{"type":"move","direction":"up"}"#, "\n",
        r#"{"type":"newGame"}"#, "\n",
    );
    let responses = run_lines(&mut session, input);

    assert!(matches!(&responses[1], Response::Error(m) if m.code == ErrorCode::IllegalContinuation));
    assert!(matches!(&responses[2], Response::Snapshot(m) if m.state == GameState::Won));
    assert!(matches!(&responses[3], Response::Snapshot(m) if m.state == GameState::Playing));
    assert!(matches!(&responses[4], Response::Snapshot(m) if m.state == GameState::Lost));
    assert!(matches!(&responses[5], Response::Error(m) if m.code == ErrorCode::SessionTerminated));
    assert!(matches!(
        &responses[6],
        Response::Snapshot(m) if m.state == GameState::Idle && m.score == 0 && m.best_score == 2048
    ));
}

#[test]
fn test_busy_and_settle() {
    let mut rng = ScriptedRng::default();
    rng.push_spawn(0, false).push_spawn(0, false);
    let game = Game::with_config(
        rng,
        MemoryStore::new(),
        GameConfig {
            hold_until_settled: true,
        },
    );
    let mut session = Session::new(game);
    let input = concat!(
        r#"{"type":"move","direction":"right"}"#, "\n",
        r#"{"type":"move","direction":"left"}"#, "\n",
        r#"{"type":"settle"}"#, "\n",
        r#"{"type":"move","direction":"left"}"#, "\n",
    );
    let responses = run_lines(&mut session, input);

    assert!(matches!(&responses[1], Response::Snapshot(m) if m.moved));
    assert!(matches!(&responses[2], Response::Error(m) if m.code == ErrorCode::Busy));
    assert!(matches!(&responses[3], Response::Snapshot(_)));
    assert!(matches!(&responses[4], Response::Snapshot(m) if m.moved));
}

#[test]
fn test_wire_format() {
    let mut session = scripted_session();
    let mut out = Vec::new();
    run(&mut session, Cursor::new(&b"{\"type\":\"continue\"}\n"[..]), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    let first: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(first["type"], "snapshot");
    assert_eq!(first["seq"], 1);
    assert_eq!(first["state"], "idle");
    assert_eq!(first["moved"], false);
    assert_eq!(first["grid"][0][0], 2);
    assert!(first["grid"][3][3].is_null());

    let second: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(second["type"], "error");
    assert_eq!(second["code"], "illegal_continuation");
    assert!(second["message"].as_str().unwrap().contains("idle"));
    assert!(lines.next().is_none());
}
