use street_shooter::storage::*;

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[test]
fn missing_high_score_is_zero() {
    let store = MemoryStore::new();
    assert_eq!(load_high_score(&store), 0);
}

#[test]
fn non_numeric_high_score_is_zero() {
    for raw in ["", "abc", "-3", "1.5", "99999999999999"] {
        let store = MemoryStore::with_entry(HIGH_SCORE_KEY, raw);
        assert_eq!(load_high_score(&store), 0, "raw value {:?}", raw);
    }
}

#[test]
fn high_score_stored_as_decimal_string() {
    let mut store = MemoryStore::new();
    save_high_score(&mut store, 42).unwrap();
    assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("42"));
    assert_eq!(load_high_score(&store), 42);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let store = MemoryStore::with_entry(HIGH_SCORE_KEY, " 17\n");
    assert_eq!(load_high_score(&store), 17);
}

// ── JsonFileStore ─────────────────────────────────────────────────────────────

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(STORAGE_FILE);

    let mut store = JsonFileStore::open(&path);
    assert_eq!(load_high_score(&store), 0);
    save_high_score(&mut store, 12).unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::open(&path);
    assert_eq!(load_high_score(&reopened), 12);
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_store_writes_plain_key_value_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STORAGE_FILE);

    let mut store = JsonFileStore::open(&path);
    save_high_score(&mut store, 8).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["highScore"], serde_json::Value::String("8".to_string()));
}

#[test]
fn file_store_keeps_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STORAGE_FILE);
    std::fs::write(&path, r#"{"volume": "loud", "highScore": "3"}"#).unwrap();

    let mut store = JsonFileStore::open(&path);
    assert_eq!(load_high_score(&store), 3);
    save_high_score(&mut store, 4).unwrap();

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("volume").as_deref(), Some("loud"));
    assert_eq!(load_high_score(&reopened), 4);
}

#[test]
fn corrupt_file_reads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STORAGE_FILE);
    std::fs::write(&path, "this is not json").unwrap();

    let mut store = JsonFileStore::open(&path);
    assert_eq!(load_high_score(&store), 0);
    save_high_score(&mut store, 1).unwrap();
    assert_eq!(load_high_score(&JsonFileStore::open(&path)), 1);
}
