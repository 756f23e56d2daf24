use super::*;
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_file_is_missing() {
    let dir = tempdir().unwrap();
    let store = PrefsStore::new(dir.path().join("state.toml"));

    let prefs = store.load();
    assert_eq!(prefs, PlaybackPrefs::default());
    assert_eq!(prefs.last_index, 0);
    assert_eq!(prefs.last_position_ms, 0);
    assert!(!prefs.was_playing);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = PrefsStore::new(dir.path().join("nested").join("state.toml"));

    let prefs = PlaybackPrefs {
        last_index: 4,
        last_position_ms: 93_500,
        was_playing: true,
    };
    store.save(&prefs).unwrap();

    assert_eq!(store.load(), prefs);
}

#[test]
fn save_overwrites_the_previous_record() {
    let dir = tempdir().unwrap();
    let store = PrefsStore::new(dir.path().join("state.toml"));

    store
        .save(&PlaybackPrefs {
            last_index: 1,
            last_position_ms: 100,
            was_playing: true,
        })
        .unwrap();
    store
        .save(&PlaybackPrefs {
            last_index: 2,
            last_position_ms: 200,
            was_playing: false,
        })
        .unwrap();

    let prefs = store.load();
    assert_eq!(prefs.last_index, 2);
    assert_eq!(prefs.last_position_ms, 200);
    assert!(!prefs.was_playing);
}

#[test]
fn malformed_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "this is { not toml").unwrap();

    let store = PrefsStore::new(path);
    assert_eq!(store.load(), PlaybackPrefs::default());
}

#[test]
fn clear_removes_the_file_and_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.toml");
    let store = PrefsStore::new(path.clone());

    store.save(&PlaybackPrefs::default()).unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());
    store.clear().unwrap();
}
