use log::{Level, Metadata, Record};
use serde_json::{json, Value};
use thiserror::Error;
use time::OffsetDateTime;

use crate::config::LoggerConfig;

const CRATE: &str = env!("CARGO_CRATE_NAME");

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("could not set logger")]
    CouldNotSetLogger(#[from] log::SetLoggerError),
}

/// Writes one JSON object per record to stderr. Stdout is left alone so the
/// scan results are never mixed with progress output.
///
/// Debug and trace records from dependencies (hyper, reqwest) are dropped.
pub struct Logger {
    level: Level,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (metadata.level() <= Level::Info || metadata.target().starts_with(CRATE))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.entry(record))
        }
    }

    fn flush(&self) {}
}

impl Logger {
    pub fn new(config: &LoggerConfig) -> Logger {
        Logger {
            level: config.level,
        }
    }

    pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
        log::set_boxed_logger(Box::new(Logger::new(config)))
            .map(|()| log::set_max_level(config.level.to_level_filter()))?;

        Ok(())
    }

    fn entry(&self, record: &Record) -> Value {
        json!({
            "time": OffsetDateTime::now_utc().to_string(),
            "level": record.level(),
            "target": record.target(),
            "message": record.args().to_string(),
        })
    }
}
