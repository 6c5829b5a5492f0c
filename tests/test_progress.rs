use std::fs;

use sky_burger::entities::ProgressState;
use sky_burger::progress::*;

// ── parse_progress ────────────────────────────────────────────────────────────

#[test]
fn parse_full_progress() {
    let progress = parse_progress("unlocked_level = 4\ncurrency = 12.5\n");
    assert_eq!(progress.unlocked_level, 4);
    assert_eq!(progress.currency, 12.5);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let progress = parse_progress("currency = 3.0\n");
    assert_eq!(progress.unlocked_level, 1);
    assert_eq!(progress.currency, 3.0);

    let progress = parse_progress("");
    assert_eq!(progress, ProgressState::default());
}

#[test]
fn malformed_content_falls_back_to_defaults() {
    let progress = parse_progress("unlocked_level = \"lots\"\n!!!");
    assert_eq!(progress, ProgressState::default());
}

#[test]
fn out_of_range_values_are_clamped() {
    let progress = parse_progress("unlocked_level = -3\ncurrency = -1.0\n");
    assert_eq!(progress.unlocked_level, 1);
    assert_eq!(progress.currency, 0.0);
}

#[test]
fn integer_currency_is_accepted() {
    let progress = parse_progress("unlocked_level = 2\ncurrency = 7\n");
    assert_eq!(progress.currency, 7.0);
}

// ── FileProgressStore ─────────────────────────────────────────────────────────

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path().join("progress.toml"));
    assert_eq!(store.load(), ProgressState::default());
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.toml");
    let mut store = FileProgressStore::new(&path);

    let progress = ProgressState { unlocked_level: 6, currency: 41.25 };
    store.save(&progress).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("unlocked_level = 6"));
    assert_eq!(FileProgressStore::new(&path).load(), progress);
}

#[test]
fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.toml");
    fs::write(&path, "this is not toml = = =").unwrap();
    assert_eq!(FileProgressStore::new(&path).load(), ProgressState::default());
}

#[test]
fn save_into_missing_directory_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("progress.toml");
    let mut store = FileProgressStore::new(&path);
    let err = store.save(&ProgressState::default()).unwrap_err();
    assert!(matches!(err, ProgressError::Write { .. }));
    assert!(err.to_string().contains("progress.toml"));
}

// ── MemoryProgressStore ───────────────────────────────────────────────────────

#[test]
fn memory_store_counts_saves() {
    let mut store = MemoryProgressStore::default();
    assert_eq!(store.load(), ProgressState::default());
    store
        .save(&ProgressState { unlocked_level: 2, currency: 1.0 })
        .unwrap();
    assert_eq!(store.saves, 1);
    assert_eq!(store.load().unlocked_level, 2);
}
