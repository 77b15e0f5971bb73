use std::fs;

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use swatch_storage::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleTheme {
    id: String,
    name: String,
    is_pinned: Option<bool>,
}

fn sample_themes() -> Vec<SampleTheme> {
    vec![
        SampleTheme {
            id: "theme-1-abcdefg".to_string(),
            name: "Dusk".to_string(),
            is_pinned: None,
        },
        SampleTheme {
            id: "theme-2-hijklmn".to_string(),
            name: "Dawn".to_string(),
            is_pinned: Some(true),
        },
    ]
}

fn open_store(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path().join("data")).expect("Failed to open store")
}

#[test]
fn file_store_creates_directory() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    assert!(store.dir().is_dir());
}

#[test]
fn file_store_writes_one_file_per_key() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    save_json(&store, keys::CUSTOM_THEMES, &sample_themes()).unwrap();
    save_json(&store, keys::ACTIVE_THEME_ID, "theme-1-abcdefg").unwrap();

    let themes_path = store.path_for(keys::CUSTOM_THEMES);
    assert_eq!(themes_path.file_name().unwrap(), "custom-themes.json");
    assert!(themes_path.exists());

    let raw = fs::read_to_string(store.path_for(keys::ACTIVE_THEME_ID)).unwrap();
    assert_eq!(raw, "\"theme-1-abcdefg\"");
}

#[test]
fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir);
        save_json(&store, keys::CUSTOM_THEMES, &sample_themes()).unwrap();
    }

    let reopened = open_store(&dir);
    let themes: Vec<SampleTheme> = load_json(&reopened, keys::CUSTOM_THEMES)
        .unwrap()
        .unwrap();
    assert_eq!(themes, sample_themes());
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.set(keys::ACTIVE_BRAND_PROFILE, "\"profile-1\"").unwrap();
    store.remove(keys::ACTIVE_BRAND_PROFILE).unwrap();
    store.remove(keys::ACTIVE_BRAND_PROFILE).unwrap();
    assert_eq!(store.get(keys::ACTIVE_BRAND_PROFILE).unwrap(), None);
}

#[test]
fn file_store_reports_malformed_json() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    fs::write(store.path_for(keys::PINNED_THEME_IDS), "[\"a\",").unwrap();

    let pinned: Result<Option<Vec<String>>> = load_json(&store, keys::PINNED_THEME_IDS);
    assert!(matches!(pinned, Err(StorageError::Json(_))));
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    assert!(matches!(
        store.set("../outside", "1"),
        Err(StorageError::InvalidKey(_))
    ));
}

#[test]
fn stores_are_interchangeable() {
    let dir = TempDir::new().unwrap();
    let backends: Vec<Box<dyn KeyValueStore>> =
        vec![Box::new(MemoryStore::new()), Box::new(open_store(&dir))];

    for store in &backends {
        for key in keys::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
        save_json(&**store, keys::EDITOR_STATE, &serde_json::json!({"currentMode": "dark"}))
            .unwrap();
        let value: serde_json::Value = load_json(&**store, keys::EDITOR_STATE)
            .unwrap()
            .unwrap();
        assert_eq!(value["currentMode"], "dark");
    }
}
