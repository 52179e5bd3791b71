//! Log subscriber construction.
//!
//! The subscriber is handed to the core as a `Dispatch` instead of being
//! installed globally.

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;

use crate::config::LogLevel;

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Build a stderr `fmt` subscriber filtered at `level`.
pub fn build_dispatch(level: LogLevel) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}
