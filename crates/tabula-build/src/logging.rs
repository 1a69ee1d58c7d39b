//! Logging setup for tools driving the pipeline.
//!
//! This module is only available with the `logging` feature.
//!
//! The library itself only emits `tracing` events. Binaries that want output
//! without wiring their own subscriber can use these helpers.

use std::sync::Once;

use tabula_config::GlobalSettings;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Verbosity of pipeline output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    /// Run summary (default)
    #[default]
    Info,
    /// One line per descriptor
    Debug,
    /// Entry resolution details
    Trace,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Silent => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Level named by `settings.log_level`, or the default when unset or
    /// unrecognized.
    pub fn from_settings(settings: &GlobalSettings) -> Self {
        settings
            .log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}

/// Install a global subscriber at `level`.
///
/// `RUST_LOG` directives still apply on top of `level`. Only the first call in
/// a process takes effect.
///
/// ```rust,no_run
/// use tabula_build::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(level.level_filter().into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

/// Install a global subscriber at the level configured in `settings`.
pub fn init_logging_from_settings(settings: &GlobalSettings) {
    init_logging(LogLevel::from_settings(settings));
}

/// Install a global subscriber driven by `RUST_LOG`, falling back to `info`.
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy()
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn level_from_settings() {
        let settings = GlobalSettings {
            log_level: Some("debug".into()),
        };
        assert_eq!(LogLevel::from_settings(&settings), LogLevel::Debug);

        let settings = GlobalSettings {
            log_level: Some("chatty".into()),
        };
        assert_eq!(LogLevel::from_settings(&settings), LogLevel::Info);
        assert_eq!(LogLevel::from_settings(&GlobalSettings::default()), LogLevel::Info);
    }

    #[test]
    fn display_matches_filter() {
        assert_eq!(LogLevel::Silent.to_string(), "off");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
