use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::api_client::DEFAULT_SERVER_URL;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub server_url: String,

    #[serde(with = "flag")]
    pub dark_mode: bool,

    pub sidebar_collapsed: bool,
    pub ui_scale: f32,
    pub poll_interval_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            dark_mode: false,
            sidebar_collapsed: false,
            ui_scale: 1.0,
            poll_interval_ms: 1000,
        }
    }
}

impl UiSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn clamped_scale(&self) -> f32 {
        self.ui_scale.clamp(0.75, 2.0)
    }
}

/// Stored as "1" / "0".
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(raw.trim() == "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_is_a_string_flag() {
        let settings = UiSettings {
            dark_mode: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["dark_mode"], "1");

        let back: UiSettings = serde_json::from_value(json).unwrap();
        assert!(back.dark_mode);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: UiSettings = serde_json::from_str(r#"{"dark_mode":"0"}"#).unwrap();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.poll_interval(), Duration::from_millis(1000));
        assert!(!settings.sidebar_collapsed);
    }
}
