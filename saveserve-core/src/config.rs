use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.saveserve/.env
///
/// Runs before logging is set up so `RUST_LOG` can come from a `.env` file.
/// Returns the files that were loaded; see [`log_dotenv`].
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        // dotenvy doesn't overwrite existing vars
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Report what [`load_dotenv`] picked up, once a subscriber is installed.
pub fn log_dotenv(loaded_from: &[PathBuf]) {
    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.saveserve)");
    } else {
        let files: Vec<String> = loaded_from.iter().map(|p| p.display().to_string()).collect();
        info!("Loaded environment from: {}", files.join(", "));
    }
}

/// ~/.saveserve
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".saveserve"))
}

/// ~/.saveserve/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SaveServeConfig {
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub narrative: NarrativeConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// Inbox the relay forwards submissions to
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Full endpoint override; defaults to the relay's AJAX URL for `recipient`
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_recipient() -> String {
    "aryanpatil0700@gmail.com".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            endpoint: None,
        }
    }
}

impl RelayConfig {
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://formsubmit.co/ajax/{}", self.recipient))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NarrativeConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// Submission log file; defaults to ~/.saveserve/saveServe_submissions.json
    #[serde(default)]
    pub submissions_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn submissions_path(&self) -> Result<PathBuf> {
        match &self.submissions_path {
            Some(path) => Ok(path.clone()),
            None => crate::submissions::JsonFileStore::default_path().ok_or_else(|| {
                CoreError::config("~/.saveserve", "could not determine home directory")
            }),
        }
    }
}

impl SaveServeConfig {
    /// Load from `path`, or ~/.saveserve/config.toml when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content).map_err(|reason| CoreError::config(&path, reason))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = SaveServeConfig::from_toml("").unwrap();
        assert_eq!(config, SaveServeConfig::default());
        assert_eq!(
            config.relay.endpoint(),
            "https://formsubmit.co/ajax/aryanpatil0700@gmail.com"
        );
        assert_eq!(config.narrative.model, "gemini-3-flash-preview");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SaveServeConfig::from_toml(
            r#"
            [relay]
            recipient = "team@example.org"

            [storage]
            submissions_path = "/tmp/log.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.relay.endpoint(), "https://formsubmit.co/ajax/team@example.org");
        assert_eq!(
            config.storage.submissions_path().unwrap(),
            PathBuf::from("/tmp/log.json")
        );
        assert_eq!(config.narrative, NarrativeConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SaveServeConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, SaveServeConfig::default());
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[relay\nrecipient = 1").unwrap();

        let err = SaveServeConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
