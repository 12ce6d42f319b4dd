pub mod types;
pub mod logger;
pub mod corpus;
pub mod navigation;
pub mod matcher;
pub mod progress_store;
pub mod transcription;
pub mod app_settings;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::error::Error;
use app_dirs::{get_app_root, AppDataType, AppInfo};

/// Languages the bundled corpus ships with. Progress entries with other
/// language prefixes are ignored during store scans.
pub static SUPPORTED_LANGUAGES: [&str; 2] = ["en", "ko"];

pub const APP_INFO: AppInfo = AppInfo { name: "pilsa", author: "pilsa" };

pub fn get_create_pilsa_app_root() -> Result<PathBuf, Box<dyn Error>> {
    // AppDataType::UserData
    // - Linux: ~/.local/share/pilsa
    let p = get_app_root(AppDataType::UserData, &APP_INFO)?;
    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}

/// Directory holding one JSON file per attempted verse.
pub fn get_create_pilsa_progress_path() -> PathBuf {
    let p = get_create_pilsa_app_root().unwrap_or(PathBuf::from(".")).join("progress/");
    if !p.exists() {
        let _ = create_dir_all(&p);
    }
    p
}

pub fn get_pilsa_settings_path() -> PathBuf {
    get_create_pilsa_app_root().unwrap_or(PathBuf::from(".")).join("settings.json")
}
