//! Runtime settings for the command-line caller.
//!
//! Settings cover logging and output only. The risk chart is fixed and has
//! no configuration surface.
//!
//! Resolution order, later wins:
//!   1. built-in defaults
//!   2. TOML settings file (`--config`, or `rowing_safety.toml` if present)
//!   3. environment (`ROWING_LOG_LEVEL`, `ROWING_LOG_FILE`,
//!      `ROWING_LOG_TIMESTAMPS`), with `.env` loaded first

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::logging::LogLevel;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "rowing_safety.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Warning,
            file: None,
            console_timestamps: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub output: OutputFormat,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io { path: String, source: std::io::Error },
    /// The settings file is not valid TOML for `Settings`.
    Parse { path: String, message: String },
    /// An environment override held an unusable value.
    InvalidEnv { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Cannot read {}: {}", path, source),
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid settings in {}: {}", path, message)
            }
            ConfigError::InvalidEnv { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Settings {
    pub fn from_toml_str(text: &str, path: &str) -> Result<Settings, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Settings, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// Takes a lookup function instead of reading the process environment so
    /// tests stay deterministic.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ROWING_LOG_LEVEL") {
            self.logging.level = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "ROWING_LOG_LEVEL".to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup("ROWING_LOG_FILE") {
            self.logging.file = if value.is_empty() { None } else { Some(value) };
        }

        if let Some(value) = lookup("ROWING_LOG_TIMESTAMPS") {
            self.logging.console_timestamps = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "ROWING_LOG_TIMESTAMPS".to_string(),
                        value,
                    });
                }
            };
        }

        Ok(())
    }

    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// An explicit `path` must exist. Without one, `DEFAULT_CONFIG_FILE` is
    /// used only if present.
    pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
        dotenv::dotenv().ok();

        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Settings::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
