//! Custom logging module.
//!
//! Log records are formatted with a timestamp and handed to a callback. The
//! application installs a callback that appends to a [`LogBuffer`] shared
//! with the state, so the footer can show the latest entry without the
//! logger ever taking the state lock.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of entries the buffer keeps.
///
pub const LOG_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Bounded list of formatted entries, newest last.
///
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        LogBuffer::default()
    }

    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(entry);
            while entries.len() > LOG_CAPACITY {
                entries.pop_front();
            }
        }
    }

    pub fn latest(&self) -> Option<String> {
        self.entries.lock().ok().and_then(|entries| entries.back().cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Custom logger that captures logs to state
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<Box<dyn Fn(String) + Send + Sync>>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Box<dyn Fn(String) + Send + Sync>) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }

    /// Install a logger writing into `buffer` as the global `log` backend.
    ///
    pub fn init(level: LevelFilter, buffer: LogBuffer) -> Result<(), AppError> {
        let logger = CustomLogger::new(level);
        logger.set_log_callback(Box::new(move |entry| buffer.push(entry)));
        log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(level: Level, logger: &CustomLogger) {
        logger.log(
            &Record::builder()
                .args(format_args!("focus moved"))
                .level(level)
                .target("kanban_tui")
                .build(),
        );
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::new();
        let logger = CustomLogger::new(LevelFilter::Info);
        let sink = buffer.clone();
        logger.set_log_callback(Box::new(move |entry| sink.push(entry)));

        record_at(Level::Debug, &logger);
        assert!(buffer.is_empty());

        record_at(Level::Warn, &logger);
        let latest = buffer.latest().unwrap();
        assert!(latest.contains("WARN"));
        assert!(latest.ends_with("focus moved"));
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::new();
        for i in 0..LOG_CAPACITY + 10 {
            buffer.push(format!("entry {}", i));
        }
        assert_eq!(buffer.len(), LOG_CAPACITY);
        assert_eq!(buffer.latest().as_deref(), Some(format!("entry {}", LOG_CAPACITY + 9).as_str()));
    }
}
