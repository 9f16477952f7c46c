use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod json;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save settings to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("API URL '{0}' must start with https://")]
    InsecureApiUrl(String),
}

pub trait SettingsSource {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

/// Dashboard preferences. Unknown or missing keys fall back to defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub email_notifications: bool,
    pub default_language: Language,
    pub api_url: String,
    /// Delay applied before each mutation is reflected, in milliseconds
    pub latency_ms: u64,
}

pub const DEFAULT_API_URL: &str = "https://api.dashboard.com/v1";

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            email_notifications: true,
            default_language: Language::Es,
            api_url: String::from(DEFAULT_API_URL),
            latency_ms: 0,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.api_url.starts_with("https://") {
            return Err(SettingsError::InsecureApiUrl(self.api_url.clone()));
        }
        Ok(())
    }
}

/// `<config dir>/pdash/settings.json`, or `./settings.json` without a config dir
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pdash"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.email_notifications);
        assert_eq!(settings.default_language, Language::Es);
        assert!(settings.validate().is_ok());
    }

    #[rstest]
    #[case("http://api.dashboard.com/v1")]
    #[case("api.dashboard.com")]
    #[case("")]
    fn test_rejects_non_https_api_url(#[case] api_url: &str) {
        let settings = Settings {
            api_url: api_url.to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InsecureApiUrl(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.latency_ms, 0);
    }
}
