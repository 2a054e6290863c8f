//! Narration sink for tree operations.
//!
//! The tree and the batch runner never print directly. They describe every state change and every
//! rejection through a [`Narrator`], which is injected at construction time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

const LOG_TARGET: &str = "vfs_batch";

/// Severity of a narration line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// Receives human-readable narration.
///
/// `command` is the raw text of the command the line is attributed to, when there is one.
pub trait Narrator {
    fn narrate(&self, level: Level, message: &str, command: Option<&str>);

    fn info(&self, message: &str) {
        self.narrate(Level::Info, message, None);
    }

    fn warning(&self, message: &str) {
        self.narrate(Level::Warning, message, None);
    }

    fn error(&self, message: &str) {
        self.narrate(Level::Error, message, None);
    }
}

fn format_line(message: &str, command: Option<&str>) -> String {
    match command {
        Some(command) if !command.is_empty() => format!("[{command}] {message}"),
        _ => message.to_string(),
    }
}

/// Forwards narration to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn narrate(&self, level: Level, message: &str, command: Option<&str>) {
        let line = format_line(message, command);
        match level {
            Level::Info => log::info!(target: LOG_TARGET, "{line}"),
            Level::Warning => log::warn!(target: LOG_TARGET, "{line}"),
            Level::Error => log::error!(target: LOG_TARGET, "{line}"),
        }
    }
}

/// Keeps every narrated line in memory.
///
/// Clones share the same buffer, so one handle can be given to a [`MapFS`](crate::MapFS) and another
/// kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingNarrator {
    lines: Rc<RefCell<Vec<(Level, String)>>>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines recorded so far, oldest first.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Checks whether some line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Narrator for RecordingNarrator {
    fn narrate(&self, level: Level, message: &str, command: Option<&str>) {
        self.lines
            .borrow_mut()
            .push((level, format_line(message, command)));
    }
}
