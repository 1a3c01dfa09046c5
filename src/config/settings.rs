//! TOML-based configuration for rowedit.
//!
//! Example configuration:
//! ```toml
//! [session]
//! expose_diagnostics = true
//!
//! [log]
//! filter = "rowedit=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Session-serving behavior.
    pub session: SessionSettings,

    /// Logging configuration.
    pub log: LogSettings,
}

/// Session-serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Attach structured diagnostic payloads to error responses.
    ///
    /// Disable to keep owner URIs out of responses sent to untrusted
    /// clients; codes and messages are unaffected.
    pub expose_diagnostics: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expose_diagnostics: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Tracing filter directives (e.g., "rowedit=debug").
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `ROWEDIT_CONFIG`
    /// 2. `./rowedit.toml`
    /// 3. `~/.config/rowedit/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("ROWEDIT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("rowedit.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("rowedit").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Fall back to defaults when no config file exists
        Ok(Settings::default())
    }

    /// Install a global tracing subscriber using the configured filter.
    ///
    /// `RUST_LOG` overrides the config file. Safe to call more than once;
    /// later calls are no-ops.
    pub fn init_tracing(&self) {
        let filter = match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(env_directives) => EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(env_directives),
            Err(_) => EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(&self.log.filter),
        };

        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
