use super::*;
use swiss_core::GameOutcome;

fn running_tournament(id: &str) -> Tournament {
    let mut t = Tournament::new(id, "Store Test", 3);
    for (name, rating) in [("Alice", 1900), ("Bob", 1700), ("Carol", 1600)] {
        t.add_competitor(name, rating).unwrap();
    }
    t.start().unwrap();
    let game = t.game_for_board(1).unwrap().id.clone();
    t.record_result(&game, GameOutcome::Draw).unwrap();
    t
}

#[test]
fn test_round_trip_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let tournament = running_tournament("club-2024");

    let path = store.save(&tournament).unwrap();
    assert_eq!(path, dir.path().join("club-2024.json"));
    assert!(store.exists("club-2024"));

    let loaded = store.load("club-2024").unwrap().unwrap();
    assert_eq!(loaded, tournament);
}

#[test]
fn test_missing_snapshot_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());

    assert!(store.load("nothing").unwrap().is_none());
    assert!(!store.exists("nothing"));
    assert!(!store.clear("nothing").unwrap());
}

#[test]
fn test_corrupted_snapshot_falls_back_to_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    assert!(matches!(store.load("broken"), Err(StoreError::Corrupted { .. })));

    let t = store.load_or_fresh("broken", || Tournament::new("broken", "Fresh", 5));
    assert_eq!(t.name, "Fresh");
    assert!(t.competitors.is_empty());
}

#[test]
fn test_snapshot_with_broken_invariants_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let mut tournament = running_tournament("bad");
    tournament.competitors[0].opponents.clear();
    store.save(&tournament).unwrap();

    match store.load("bad") {
        Err(StoreError::Corrupted { reason, .. }) => assert!(reason.contains("inconsistent")),
        other => panic!("expected a corrupted snapshot, got {other:?}"),
    }
}

#[test]
fn test_unknown_format_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let snapshot = Snapshot {
        format_version: SNAPSHOT_FORMAT_VERSION + 1,
        saved_at: Utc::now(),
        tournament: Tournament::new("future", "Future", 5),
    };
    std::fs::write(
        dir.path().join("future.json"),
        serde_json::to_string(&snapshot).unwrap(),
    )
    .unwrap();

    assert!(matches!(store.load("future"), Err(StoreError::Corrupted { .. })));
}

#[test]
fn test_clear_removes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(&running_tournament("gone")).unwrap();

    assert!(store.clear("gone").unwrap());
    assert!(!store.exists("gone"));
}

#[test]
fn test_ids_cannot_escape_the_directory() {
    let store = SnapshotStore::new("data");
    assert!(matches!(store.path_for("../etc"), Err(StoreError::InvalidId(_))));
    assert!(matches!(store.path_for(""), Err(StoreError::InvalidId(_))));
    assert!(store.path_for("spring_open-2").is_ok());
}
