//! Read-only startup settings.
//!
//! Loaded once from `$HOME/.config/pomo_clock/settings.json`. A missing file
//! means defaults; nothing is ever written back.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pomodoro::pomodoro::Cadence;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cadence selected when the window opens.
    pub cadence: Cadence,
    /// Initial text of the sessions field.
    pub sessions: String,
    /// 0 keeps notifications on screen until dismissed.
    pub notification_timeout_secs: u32,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cadence: Cadence::default(),
            sessions: "1".to_string(),
            notification_timeout_secs: 10,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location. On error, defaults are returned along
    /// with the error so it can be logged once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::load_from(&settings_path()) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

pub fn settings_path() -> PathBuf {
    home_dir().join(".config/pomo_clock/settings.json")
}

pub fn default_log_path() -> PathBuf {
    home_dir().join(".local/share/pomo_clock/timer.log")
}
