//! Persistent CLI settings.
//!
//! Stored as `settings.toml` in the platform config folder:
//! - macOS: ~/Library/Application Support/de.kita-import.Kita Import/
//! - Windows: %APPDATA%/kita-import/Kita Import/config/
//! - Linux: ~/.config/kitaimport/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "de";
const APP_ORG: &str = "kita-import";
const APP_NAME: &str = "Kita Import";
const CONFIG_FILENAME: &str = "settings.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TOKEN_ENV: &str = "KITA_IMPORT_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Token from the configured environment variable, if set.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Treat the first line of an upload as headers.
    pub skip_header: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self { skip_header: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub import: ImportSettings,
}

/// Path of the settings file, or `None` when no home directory is known.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from the platform config folder, falling back to defaults.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from `path`.
///
/// A missing file gives the defaults; an unreadable or unparsable one gives
/// the defaults with a warning.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(%error, "failed to parse settings file, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(%error, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}

/// Write settings to `path`, creating the parent directory.
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

/// Write settings to the platform config folder and return the path used.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let path = settings_path().context("could not determine settings path")?;
    save_settings_to(settings, &path)?;
    Ok(path)
}
