//! Structured logging for the launch safety check.
//!
//! Provides context-rich logging tagged with the component that produced
//! the message, timestamps and severity levels. Supports console output and
//! an append-only log file for club deployments that keep a launch log.
//!
//! Until `init_logger` is called every logging call is a no-op, so the
//! library stays silent when embedded in another program.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use crate::model::{EvaluationResult, FieldName, Observation};
use crate::validate::FieldErrors;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Validator,
    Engine,
    Config,
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Validator => write!(f, "VALIDATE"),
            Component::Engine => write!(f, "ENGINE"),
            Component::Config => write!(f, "CONFIG"),
            Component::Cli => write!(f, "CLI"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        // A poisoned lock only means a previous writer panicked mid-log.
        let mut slot = LOGGER.lock().unwrap_or_else(|p| p.into_inner());
        *slot = Some(logger);
    }

    fn log(&self, level: LogLevel, component: Component, context: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let entry = format_entry(level, component, context, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", entry),
            }
        } else {
            let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, context_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, context_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// Formats one log line as written to the log file.
fn format_entry(
    level: LogLevel,
    component: Component,
    context: Option<&str>,
    message: &str,
) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, component, context_part, message)
}

fn dispatch(level: LogLevel, component: Component, context: Option<&str>, message: &str) {
    let guard = LOGGER.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(logger) = guard.as_ref() {
        logger.log(level, component, context, message);
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

pub fn info(component: Component, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, component, context, message);
}

pub fn warn(component: Component, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, component, context, message);
}

pub fn error(component: Component, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, component, context, message);
}

pub fn debug(component: Component, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, component, context, message);
}

// ---------------------------------------------------------------------------
// Launch Decision Logging
// ---------------------------------------------------------------------------

/// Log which fields blocked an evaluation.
pub fn log_validation_failure(errors: &FieldErrors) {
    let missing: Vec<&str> = errors.missing().into_iter().map(FieldName::as_str).collect();
    let message = format!("Evaluation skipped, missing: {}", missing.join(", "));
    warn(Component::Validator, None, &message);
}

/// Log a one-line summary of a finished evaluation.
///
/// Overrides are logged at warning level so they stand out in a launch log.
pub fn log_evaluation_summary(observation: &Observation, result: &EvaluationResult) {
    let context = format!(
        "wind={} temp={} wave={} fog={} thunder={}",
        observation.wind_speed,
        observation.water_temp,
        observation.wave,
        observation.fog,
        observation.thunder
    );

    match &result.reason {
        Some(reason) if result.prohibited => {
            let message = format!("All crews prohibited: {}", reason);
            warn(Component::Engine, Some(&context), &message);
        }
        _ => {
            let verdicts: Vec<String> =
                result.crews.iter().map(|c| c.verdict.to_string()).collect();
            let message = format!("Crew verdicts: {}", verdicts.join(" / "));
            info(Component::Engine, Some(&context), &message);
        }
    }
}
