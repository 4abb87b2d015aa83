//! Leveled logging capability handed to the pipeline.
//!
//! Components never reach for a global logger; they receive an
//! [`ExportLogger`] and report through it. The binary wires in
//! [`TracingLogger`], tests use [`MemoryLogger`].

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

pub trait ExportLogger {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Forwards every message to the `tracing` subscriber installed by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ExportLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }
}

/// Keeps messages in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.borrow().clone()
    }

    /// Number of messages at `level` whose text contains `needle`.
    pub fn count_matching(&self, level: LogLevel, needle: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(entry_level, message)| *entry_level == level && message.contains(needle))
            .count()
    }
}

impl ExportLogger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}
