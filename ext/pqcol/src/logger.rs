// Logging backend for the C ABI
// Installs env_logger once, at the first exported call

use std::str::FromStr;
use std::sync::Once;

use log::LevelFilter;

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "PQCOL_LOG_LEVEL";

/// Severity levels accepted in `PQCOL_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "off" => LogLevel::Off,
            _ => return Err(format!("Invalid log level: {}", s)),
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

impl LogLevel {
    /// Level from the environment, `warn` when unset or unparsable
    pub fn from_env() -> Self {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogLevel::Warn)
    }
}

static INIT: Once = Once::new();

/// Install the stderr logger unless the host process already set one
pub(crate) fn init() {
    INIT.call_once(|| {
        let level = LogLevel::from_env();
        let _ = env_logger::Builder::new()
            .filter_level(level.into())
            .format_timestamp_millis()
            .try_init();
    });
}
