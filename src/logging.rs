// Logging setup for applications embedding observer-registry
//
// The registry emits only through the `log` facade: debug records for the
// fail-soft branches (attach to an unregistered event, duplicate attach,
// detach without a subscription) and trace records for dispatch. This module
// builds an `env_logger` backend scoped to those records:
// - `observer_registry::*` targets log at the configured level, everything
//   else at `warn`
// - Text or JSON lines with local timestamps
// - Optional file output instead of stderr
// - `OBSERVER_REGISTRY_LOG` accepts `env_logger` filter directives on top
//
// Example usage:
// ```
// let config = LogConfig {
//     level: LevelFilter::Debug,
//     format: LogFormat::Json,
//     file: Some(PathBuf::from("registry.log")),
// };
// init_logger(&config)?;
// ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::{Builder, Env, Target, WriteStyle};
use log::{LevelFilter, Record};
use serde::{Deserialize, Serialize};

/// Environment variable holding extra filter directives
pub const LOG_ENV_VAR: &str = "OBSERVER_REGISTRY_LOG";

/// Target prefix shared by every record the registry emits
pub const REGISTRY_TARGET: &str = "observer_registry";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

/// One JSON log line
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// Logging configuration, usually read from the `[logging]` section
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Level for registry records
    pub level: LevelFilter,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            format: LogFormat::Text,
            file: None,
        }
    }
}

fn format_text_line(timestamp: &str, record: &Record) -> String {
    format!("{} [{}] {}: {}", timestamp, record.level(), record.target(), record.args())
}

fn format_json_line(timestamp: &str, record: &Record) -> Result<String> {
    let entry = JsonLogEntry {
        timestamp: timestamp.to_string(),
        level: record.level().to_string(),
        target: record.target().to_string(),
        message: record.args().to_string(),
    };

    serde_json::to_string(&entry).context("Failed to serialize log entry to JSON")
}

/// Build, without installing, a logger for `config`
pub fn logger_builder(config: &LogConfig) -> Result<Builder> {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(REGISTRY_TARGET, config.level)
        .parse_env(Env::new().filter(LOG_ENV_VAR));

    let format = config.format;
    builder.format(move |buf, record| {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = match format {
            LogFormat::Text => format_text_line(&timestamp, record),
            LogFormat::Json => format_json_line(&timestamp, record)
                .unwrap_or_else(|_| format_text_line(&timestamp, record)),
        };
        writeln!(buf, "{line}")
    });

    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file))).write_style(WriteStyle::Never);
    }

    Ok(builder)
}

/// Install the configured logger as the global `log` backend
pub fn init_logger(config: &LogConfig) -> Result<()> {
    logger_builder(config)?
        .try_init()
        .context("Failed to set global logger")
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off", level_str)),
    }
}
