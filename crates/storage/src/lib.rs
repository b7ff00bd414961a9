use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Built-in endpoint used until an override is persisted.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/jobs";

/// Values persisted in the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Durable store for user-overridable configuration.
///
/// The file is read on every lookup, so a `set` from another process is
/// visible to the next caller without in-process coordination.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Opens a store over the given settings file path. The file does
    /// not need to exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads persisted settings, falling back to defaults when the file
    /// does not exist yet.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(SettingsError::Io(err)),
        }
    }

    /// Overwrites the settings file immediately, creating parent
    /// directories as needed.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(SettingsError::Io)?;
            }
        }
        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, contents).map_err(SettingsError::Io)
    }

    /// Resolves the effective base URL for the job collection.
    ///
    /// Falls back to [`DEFAULT_API_URL`] when no override is stored or
    /// the stored value does not parse as a URL.
    pub fn api_url(&self) -> Url {
        self.load()
            .ok()
            .and_then(|settings| settings.api_url)
            .and_then(|value| Url::parse(&value).ok())
            .unwrap_or_else(default_api_url)
    }

    /// Persists a new base URL override after checking that it parses.
    ///
    /// Reachability is not verified; the value takes effect on the next
    /// client call.
    pub fn set_api_url(&self, value: &str) -> Result<Url, SettingsError> {
        let url = Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
            value: value.to_string(),
            source,
        })?;
        let mut settings = self.load()?;
        settings.api_url = Some(url.to_string());
        self.save(&settings)?;
        Ok(url)
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default api url is valid")
}

/// Errors produced by the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid api url {value:?}: {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
}
