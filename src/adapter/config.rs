//! Configuration Files
//!
//! config.json（出力先、録音ディレクトリ、プリセット）と auth.json（OAuthクライアント）の読み込み

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::mix::MAX_TAGS;
use crate::domain::entities::preset::{NamePattern, Preset};
use crate::domain::repositories::authorization_repository::ClientCredentials;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/mixcloud-uploader/config.json";
pub const DEFAULT_AUTH_PATH: &str = "~/.config/mixcloud-uploader/auth.json";
pub const DEFAULT_CACHED_AUTH_PATH: &str = "~/.config/mixcloud-uploader/cached-auth.json";
pub const DEFAULT_RECORDINGS_DIR: &str = "~/Music/Mixxx/Recordings";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Expands `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(path).into_owned());
    PathBuf::from(expanded)
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<Option<T>, ConfigError> {
    let expanded = expand_path(path);
    if !expanded.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&expanded).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// A preset as written in config.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PresetConfig {
    pub name_pattern: Option<String>,
    pub artwork: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: Option<String>,
}

impl PresetConfig {
    fn validate(&self, key: &str) -> Result<(), String> {
        if let Some(pattern) = &self.name_pattern {
            NamePattern::new(pattern).map_err(|e| format!("preset '{}': {}", key, e))?;
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(format!("preset '{}': tags must not be empty", key));
        }
        if self.tags.len() > MAX_TAGS {
            return Err(format!(
                "preset '{}': at most {} tags are allowed, got {}",
                key,
                MAX_TAGS,
                self.tags.len()
            ));
        }
        Ok(())
    }

    /// Converts into the domain preset, expanding the artwork path
    pub fn to_preset(&self) -> Result<Preset, ConfigError> {
        let name_pattern = self
            .name_pattern
            .as_deref()
            .map(NamePattern::new)
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                path: "preset".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Preset {
            name_pattern,
            artwork: self.artwork.as_deref().map(expand_path),
            tags: self.tags.iter().map(|tag| tag.trim().to_string()).collect(),
            description: self.description.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub output_dir: Option<String>,
    pub recordings_dir: Option<String>,
    pub access_token: Option<String>,
    #[serde(default)]
    pub presets: BTreeMap<String, PresetConfig>,
}

impl Config {
    /// Loads and validates config.json
    ///
    /// A missing file yields the default config
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let Some(config) = read_json::<Config>(path)? else {
            info!("No config found at {}, using defaults", path);
            return Ok(Self::default());
        };

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_string(),
            reason,
        })?;

        info!(
            "Loaded config from {} ({} presets)",
            path,
            config.presets.len()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        for (key, preset) in &self.presets {
            preset.validate(key)?;
        }
        Ok(())
    }

    pub fn preset(&self, key: &str) -> Option<&PresetConfig> {
        self.presets.get(key)
    }

    pub fn recordings_dir(&self) -> PathBuf {
        expand_path(
            self.recordings_dir
                .as_deref()
                .unwrap_or(DEFAULT_RECORDINGS_DIR),
        )
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().map(expand_path)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// OAuth client credentials from auth.json
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl AuthConfig {
    /// Loads and validates auth.json
    ///
    /// A missing file yields `None`
    pub fn load(path: &str) -> Result<Option<Self>, ConfigError> {
        let Some(auth) = read_json::<AuthConfig>(path)? else {
            return Ok(None);
        };

        if auth.client_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                reason: "client-id must not be empty".to_string(),
            });
        }
        if auth.client_secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                reason: "client-secret must not be empty".to_string(),
            });
        }

        Ok(Some(auth))
    }

    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(self.client_id.trim(), self.client_secret.trim())
    }
}
