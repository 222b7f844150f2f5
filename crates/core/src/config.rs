// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration: TOML file plus environment secrets.
//!
//! Built once at startup and passed by value into the adapters and services.
//! There is no module-global client or credential state.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the store write credential.
pub const GITHUB_TOKEN_ENV: &str = "TAPLOG_GITHUB_TOKEN";
/// Environment variable holding the approval credential.
pub const ADMIN_SECRET_ENV: &str = "TAPLOG_ADMIN_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Remote store coordinates for the backing file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Repository owner on the hosting service
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path of the backing file inside the repository
    pub path: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Local read-only copy used when the remote store is unreachable
    #[serde(default)]
    pub local_fallback: Option<PathBuf>,
    /// Network timeout for store calls
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    store: StoreConfig,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    /// Store write credential. Reads work without one on public repositories.
    pub github_token: Option<String>,
    /// Administrator credential checked by the approval service.
    pub admin_secret: String,
}

impl Config {
    /// Load configuration from a TOML file, pulling secrets from the
    /// environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let github_token = std::env::var(GITHUB_TOKEN_ENV).ok();
        let admin_secret =
            std::env::var(ADMIN_SECRET_ENV).map_err(|_| ConfigError::MissingEnv(ADMIN_SECRET_ENV))?;
        Self::parse(&raw, github_token, admin_secret)
    }

    /// Parse configuration from TOML content with secrets supplied directly.
    pub fn parse(
        raw: &str,
        github_token: Option<String>,
        admin_secret: String,
    ) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw)?;
        Ok(Self {
            store: file.store,
            github_token,
            admin_secret,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
