//! Registry-level tests: session lifecycle, error surfacing, snapshots,
//! and observer plumbing through [`SessionManager`].

use oanquan::{
    GameConfig, GameSnapshot, GameStatus, JoinError, Move, MoveError, SessionError, SessionManager,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn manager_with_table(id: &str) -> SessionManager {
    let manager = SessionManager::new();
    manager
        .create_session(id.to_string(), GameConfig::default(), 0)
        .unwrap();
    manager
}

#[test]
fn create_and_list_sessions() {
    let manager = SessionManager::new();
    assert!(manager.list_sessions().is_empty());

    manager
        .create_session("table-1".to_string(), GameConfig::default(), 0)
        .unwrap();
    manager
        .create_session("table-2".to_string(), GameConfig::default(), 1)
        .unwrap();

    let mut ids = manager.list_sessions();
    ids.sort();
    assert_eq!(ids, vec!["table-1".to_string(), "table-2".to_string()]);
}

#[test]
fn duplicate_session_ids_rejected() {
    let manager = manager_with_table("table-1");
    let result = manager.create_session("table-1".to_string(), GameConfig::default(), 0);
    assert_eq!(result, Err(SessionError::AlreadyExists));
}

#[test]
fn unknown_session_is_not_found_everywhere() {
    let manager = SessionManager::new();
    assert_eq!(manager.join("nope"), Err(SessionError::NotFound));
    assert_eq!(
        manager.submit_move("nope", 0, None),
        Err(SessionError::NotFound)
    );
    assert_eq!(manager.snapshot("nope"), Err(SessionError::NotFound));
    assert!(manager.snapshot_json("nope").is_err());
    assert_eq!(
        manager.subscribe_update("nope", |_| {}),
        Err(SessionError::NotFound)
    );
    assert_eq!(
        manager.subscribe_end("nope", |_| {}),
        Err(SessionError::NotFound)
    );
}

#[test]
fn join_fills_the_table_and_surfaces_game_full() {
    let manager = SessionManager::new();
    manager
        .create_session("table-1".to_string(), GameConfig::default(), 1)
        .unwrap();

    assert_eq!(manager.join("table-1"), Ok(1));
    assert_eq!(
        manager.join("table-1"),
        Err(SessionError::Join(JoinError::GameFull))
    );

    let snapshot = manager.snapshot("table-1").unwrap();
    assert_eq!(snapshot.status, GameStatus::InProgress);
}

#[test]
fn moves_flow_through_the_registry() {
    let manager = manager_with_table("table-1");
    assert_eq!(manager.join("table-1"), Ok(0));
    assert_eq!(manager.join("table-1"), Ok(1));

    let updates = Arc::new(AtomicUsize::new(0));
    let updates_cb = Arc::clone(&updates);
    manager
        .subscribe_update("table-1", move |_| {
            updates_cb.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    // Both scripted moves end on a corner boundary without capturing,
    // so the game stays in progress.
    manager
        .submit_move("table-1", 0, Some(Move::new(1, true)))
        .unwrap();
    manager
        .submit_move("table-1", 1, Some(Move::new(7, true)))
        .unwrap();
    assert_eq!(updates.load(Ordering::SeqCst), 2);

    // A rejection from the game comes back as a typed session error.
    assert_eq!(
        manager.submit_move("table-1", 1, Some(Move::new(7, true))),
        Err(SessionError::Move(MoveError::NotYourTurn(1)))
    );

    let snapshot = manager.snapshot("table-1").unwrap();
    assert_eq!(snapshot.status, GameStatus::InProgress);
    assert_eq!(snapshot.active_player, 0);
}

#[test]
fn snapshot_json_matches_the_typed_snapshot() {
    let manager = manager_with_table("table-1");
    manager.join("table-1").unwrap();
    manager.join("table-1").unwrap();

    let json = manager.snapshot_json("table-1").unwrap();
    assert!(json.contains("\"status\":\"in_progress\""));

    let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, manager.snapshot("table-1").unwrap());
}

#[test]
fn clones_share_the_registry() {
    let manager = manager_with_table("table-1");
    let clone = manager.clone();
    clone
        .create_session("table-2".to_string(), GameConfig::default(), 0)
        .unwrap();
    assert_eq!(manager.list_sessions().len(), 2);
}
