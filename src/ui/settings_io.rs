use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;

use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("reel_trivia");
    fs::create_dir_all(&path).ok();
    path.push("ui_settings.json");
    path
}

pub fn load_settings() -> UiSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &UiSettings) {
    if let Err(e) = save_settings_to(settings, &settings_path()) {
        warn!("could not save settings: {:#}", e);
    }
}

/// Missing or unreadable files give the defaults.
pub fn load_settings_from(path: &Path) -> UiSettings {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn save_settings_to(settings: &UiSettings, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");

        let settings = UiSettings {
            server_url: "http://media.local:5054".into(),
            dark_mode: true,
            sidebar_collapsed: true,
            ui_scale: 1.25,
            poll_interval_ms: 500,
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), UiSettings::default());

        assert_eq!(
            load_settings_from(&dir.path().join("missing.json")),
            UiSettings::default()
        );
    }
}
