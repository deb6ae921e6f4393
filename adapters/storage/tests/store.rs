use starminer_core::SaveState;
use starminer_storage::{FileStore, MemoryStore, SaveStore};

fn progress() -> SaveState {
    SaveState {
        resources: 903.5,
        miner_level: 3,
        miner_cost: 33.0,
        engine_level: 1,
        engine_cost: 90.0,
        last_save_time: 1_700_000_000_123,
    }
}

#[test]
fn missing_file_loads_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileStore::new(dir.path().join("save.json"));
    assert_eq!(store.load().expect("readable"), None);
}

#[test]
fn file_store_round_trips_progress() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = FileStore::new(dir.path().join("nested").join("save.json"));

    store.save(&progress()).expect("writable");
    assert_eq!(store.load().expect("readable"), Some(progress()));
    assert!(!store.path().with_extension("json.tmp").exists());

    let mut updated = progress();
    updated.resources = 1.0;
    store.save(&updated).expect("writable");
    assert_eq!(store.load().expect("readable"), Some(updated));
}

#[test]
fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("save.json");
    std::fs::write(&path, "{\"resources\": \"lots\", \"minerLevel\": 4").expect("writable");

    let store = FileStore::new(path);
    assert_eq!(store.load().expect("readable"), Some(SaveState::default()));
}

#[test]
fn memory_store_keeps_json_text() {
    let mut store = MemoryStore::default();
    assert_eq!(store.load().expect("infallible"), None);

    store.save(&progress()).expect("encodable");
    let text = store.contents().expect("saved");
    assert!(text.contains("\"minerLevel\":3"));
    assert_eq!(store.load().expect("infallible"), Some(progress()));
}

#[test]
fn memory_store_applies_field_defaults() {
    let store = MemoryStore::with_contents(r#"{ "resources": 42, "engineLevel": 2 }"#);
    let state = store.load().expect("infallible").expect("present");
    assert_eq!(state.resources, 42.0);
    assert_eq!(state.engine_level, 2);
    assert_eq!(state.miner_cost, 10.0);
    assert_eq!(state.engine_cost, 50.0);
}
