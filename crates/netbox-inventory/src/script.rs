//! Script host capabilities
//!
//! A report script only needs four log channels from its host and a way to
//! be run with parameters. [`ScriptLog`] is that capability; [`TracingLog`]
//! routes it to `tracing` and [`RecordingLog`] keeps it in memory.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{error, info, warn};

/// Log channel a script message is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Success,
    Info,
    Warning,
    Failure,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Success => write!(f, "success"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Failure => write!(f, "failure"),
        }
    }
}

/// Log channels the host surfaces to its operator
pub trait ScriptLog: Send + Sync {
    fn log_success(&self, message: &str);
    fn log_info(&self, message: &str);
    fn log_warning(&self, message: &str);
    fn log_failure(&self, message: &str);
}

/// Name and description shown by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptMeta {
    pub name: &'static str,
    pub description: &'static str,
}

/// A script the host can run with parameters
#[async_trait]
pub trait Script: Send + Sync {
    type Params: Send + Sync;
    type Output: Send;

    fn meta(&self) -> ScriptMeta;

    /// Run once; every exit path is part of `Output`
    async fn run(&self, params: &Self::Params, log: &dyn ScriptLog) -> Self::Output;
}

/// Host log backed by `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ScriptLog for TracingLog {
    fn log_success(&self, message: &str) {
        info!(channel = "success", "{message}");
    }

    fn log_info(&self, message: &str) {
        info!(channel = "info", "{message}");
    }

    fn log_warning(&self, message: &str) {
        warn!(channel = "warning", "{message}");
    }

    fn log_failure(&self, message: &str) {
        error!(channel = "failure", "{message}");
    }
}

/// Host log that keeps every entry in order
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in write order
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages written to one channel
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}

impl ScriptLog for RecordingLog {
    fn log_success(&self, message: &str) {
        self.push(LogLevel::Success, message);
    }

    fn log_info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn log_warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn log_failure(&self, message: &str) {
        self.push(LogLevel::Failure, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_log_keeps_order() {
        let log = RecordingLog::new();
        log.log_info("one");
        log.log_failure("two");
        log.log_success("three");

        assert_eq!(
            log.entries(),
            vec![
                (LogLevel::Info, "one".to_string()),
                (LogLevel::Failure, "two".to_string()),
                (LogLevel::Success, "three".to_string()),
            ]
        );
        assert_eq!(log.messages(LogLevel::Failure), vec!["two".to_string()]);
        assert!(log.messages(LogLevel::Warning).is_empty());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Warning.to_string(), "warning");
    }
}
