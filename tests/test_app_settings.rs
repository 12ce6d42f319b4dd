use tempfile::TempDir;

use pilsa_backend::app_settings::{AppSettings, ThemeName};

#[test]
fn test_defaults() {
    let settings = AppSettings::default();
    assert_eq!(settings.default_language, "en");
    assert_eq!(settings.theme_name, ThemeName::System);
    assert_eq!(settings.theme_name_as_string(), "system");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let settings = AppSettings {
        default_language: "ko".to_string(),
        theme_name: ThemeName::Dark,
    };
    settings.save(&path).unwrap();

    let loaded = AppSettings::load_or_default(&path);
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = AppSettings::load_or_default(&dir.path().join("nope.json"));
    assert_eq!(loaded, AppSettings::default());
}

#[test]
fn test_malformed_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{broken").unwrap();

    let loaded = AppSettings::load_or_default(&path);
    assert_eq!(loaded, AppSettings::default());
}
