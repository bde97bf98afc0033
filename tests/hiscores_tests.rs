//! High-score store tests - file defaults, save/load and failure handling

use std::path::PathBuf;

use tetrecs::core::hiscores::default_scores;
use tetrecs::core::{FileScoreStore, HighScore, HighScoreTable, ScoreStore};
use tetrecs::types::HIGH_SCORE_LIMIT;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tetrecs-{}-{}.txt", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_missing_file_gets_defaults() {
    let path = temp_path("defaults");
    let store = FileScoreStore::new(path.clone());

    let scores = store.load().unwrap();
    assert_eq!(scores, default_scores());
    assert!(path.is_file());

    let table = store.load_or_default();
    assert_eq!(table.entries()[0], HighScore::new("test", 10_000));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_save_then_load_keeps_order_and_limit() {
    let path = temp_path("save");
    let store = FileScoreStore::new(path.clone());

    let mut table = HighScoreTable::from_entries(default_scores());
    assert_eq!(table.insert(HighScore::new("ann", 12_345)), Some(0));
    store.save_or_log(&table);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), HIGH_SCORE_LIMIT);
    assert_eq!(text.lines().next(), Some("ann:12345"));

    let loaded = store.load_or_default();
    assert_eq!(loaded, table);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unreadable_file_means_no_scores() {
    let path = temp_path("broken");
    std::fs::write(&path, "ann:10\nnot a score\n").unwrap();
    let store = FileScoreStore::new(path.clone());

    assert!(store.load().is_err());
    assert!(store.load_or_default().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unsorted_file_is_sorted_on_load() {
    let path = temp_path("unsorted");
    std::fs::write(&path, "a:5\nb:50\nc:20\n").unwrap();
    let store = FileScoreStore::new(path.clone());

    let table = store.load_or_default();
    let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["b", "c", "a"]);
    let _ = std::fs::remove_file(&path);
}
