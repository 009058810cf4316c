//! Settings file loading and saving.

use std::fs;
use std::time::Duration;

use kita_cli::settings::{DEFAULT_BASE_URL, Settings, load_settings_from, save_settings_to};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.toml"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server.base_url, DEFAULT_BASE_URL);
    assert!(settings.import.skip_header);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[server]\ntimeout_secs = 5\n").unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.server.timeout(), Duration::from_secs(5));
    assert_eq!(settings.server.base_url, DEFAULT_BASE_URL);
    assert!(settings.import.skip_header);
}

#[test]
fn unparsable_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[server\nbase_url = 1").unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn saved_settings_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let mut settings = Settings::default();
    settings.server.base_url = "https://kita.example.org/api".to_string();
    settings.import.skip_header = false;

    save_settings_to(&settings, &path).unwrap();
    assert_eq!(load_settings_from(&path), settings);
}

#[test]
fn default_settings_file_layout() {
    let content = toml::to_string_pretty(&Settings::default()).unwrap();
    insta::assert_snapshot!(content, @r#"
    [server]
    base_url = "http://localhost:3000/api"
    timeout_secs = 30
    token_env = "KITA_IMPORT_TOKEN"

    [import]
    skip_header = true
    "#);
}
