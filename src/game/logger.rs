//! Centralized game logger
//!
//! All engine output goes through `GameLogger`, which filters by verbosity and
//! writes text or JSON lines either to stdout or into a memory buffer.
//! Captured entries make game output assertable in tests.

use crate::game::{GameEvent, VerbosityLevel};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OutputMode {
    #[default]
    Stdout,
    /// Captured in memory, nothing printed
    Memory,
}

/// A captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// Rendered line, in the logger's output format
    pub message: String,
    /// Optional category (e.g., "controller_choice", "game_event")
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Whether a message at `level` would go anywhere
    ///
    /// Lets callers skip formatting work for lines nobody will see.
    #[inline]
    pub fn enabled(&self, level: VerbosityLevel) -> bool {
        level <= self.verbosity && level != VerbosityLevel::Silent
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, None);
    }

    /// Log a controller decision at Normal level
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        if !self.enabled(VerbosityLevel::Normal) {
            return;
        }
        let line = format!("{controller_name} {message}");
        self.log(VerbosityLevel::Normal, &line, Some("controller_choice"));
    }

    /// Log a game event; `describe` renders the text form on demand
    pub fn event(&self, event: &GameEvent, describe: impl FnOnce() -> String) {
        let level = event.level();
        if !self.enabled(level) {
            return;
        }
        let line = match self.output_format {
            OutputFormat::Text => describe(),
            OutputFormat::Json => serde_json::to_string(event)
                .unwrap_or_else(|e| format!("{{\"error\":\"unserializable event: {e}\"}}")),
        };
        self.emit(level, line, Some("game_event"));
    }

    fn log(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if !self.enabled(level) {
            return;
        }
        let line = match self.output_format {
            OutputFormat::Text => message.to_string(),
            OutputFormat::Json => serde_json::json!({ "message": message }).to_string(),
        };
        self.emit(level, line, category);
    }

    fn emit(&self, level: VerbosityLevel, line: String, category: Option<&str>) {
        match self.output_mode {
            OutputMode::Stdout => self.write_stdout(level, &line),
            OutputMode::Memory => self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: line,
                category: category.map(str::to_string),
            }),
        }
    }

    #[inline]
    fn write_stdout(&self, level: VerbosityLevel, line: &str) {
        if level == VerbosityLevel::Minimal || self.output_format == OutputFormat::Json {
            println!("{line}");
        } else {
            println!("  {line}");
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
