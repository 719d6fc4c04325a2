// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Application-wide settings ([AMBIENT], SPEC_FULL.md §2, spec §6
//! "Persisted state": "none beyond the profile JSON and an
//! application-wide settings file"), grounded on
//! `conductor-core::config::types::Config`'s shape (serde defaults
//! throughout, no field is ever required) but trimmed to the handful of
//! daemon-wide knobs that sit outside a profile: where profiles live,
//! which one loads at startup, whether devices auto-connect, and the
//! logging configuration.

use midiflux_core::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    /// Directory profile files are loaded from and validated against
    /// (`profile::validate_profile_path`'s `allowed_root`).
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,
    /// File name (within `profiles_dir`) to activate at startup when no
    /// `--profile` argument is given.
    #[serde(default)]
    pub default_profile: Option<String>,
    /// Auto-connect every enumerated input port for a `DeviceName: "*"`
    /// device block, rather than requiring named devices.
    #[serde(default = "default_true")]
    pub auto_connect_wildcard_devices: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

fn default_profiles_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("midiflux").join("profiles")
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            profiles_dir: default_profiles_dir(),
            default_profile: None,
            auto_connect_wildcard_devices: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Default settings file path: `<config dir>/midiflux/settings.json`.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("midiflux").join("settings.json")
}

/// Loads settings from `path`, falling back to defaults (logged, not
/// fatal) when the file is absent — mirroring
/// `conductor-core::config::loader`'s "missing file is not an error, a
/// fresh default config is used" behavior, adapted from TOML to JSON.
pub fn load_settings(path: &Path) -> AppSettings {
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "settings file invalid, using defaults");
                AppSettings::default()
            }
        },
        Err(_) => AppSettings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load_settings(Path::new("/nonexistent/midiflux-settings.json"));
        assert!(settings.auto_connect_wildcard_devices);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "DefaultProfile": "studio.json" }"#).unwrap();
        let settings = load_settings(&path);
        assert_eq!(settings.default_profile, Some("studio.json".to_string()));
        assert!(settings.auto_connect_wildcard_devices);
    }
}
