//! Diagnostic reporting port.
//!
//! The model never throws for its own invariant handling. Corrections it has to
//! make and notifier protocol violations are handed to a [`Reporter`] that the
//! caller injects at construction time, so production code can route them to
//! the console while tests collect them in memory.

use crate::config::LOG_TARGET;
use log::{error, warn};
use std::cell::RefCell;
use std::error::Error;

/// Sink for corrective diagnostics and structured errors.
pub trait Reporter {
    /// An input was accepted but had to be adjusted.
    fn warn(&self, module: &str, message: &str);

    /// A non-fatal error, e.g. an event emitted with nobody listening.
    fn error(&self, module: &str, error: &dyn Error);
}

/// Forwards everything to the `log` facade, prefixed with a timestamp and the
/// reporting module.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, module: &str, message: &str) {
        warn!(target: LOG_TARGET, "[{}] [{}] {}", timestamp(), module, message);
    }

    fn error(&self, module: &str, err: &dyn Error) {
        error!(target: LOG_TARGET, "[{}] [{}] {}", timestamp(), module, err);
    }
}

/// Keeps every report in memory. Useful for headless callers and tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    warnings: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings in the order they were reported, formatted as `[module] message`.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    /// Errors in the order they were reported, formatted as `[module] error`.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn clear(&self) {
        self.warnings.borrow_mut().clear();
        self.errors.borrow_mut().clear();
    }
}

impl Reporter for MemoryReporter {
    fn warn(&self, module: &str, message: &str) {
        self.warnings
            .borrow_mut()
            .push(format!("[{}] {}", module, message));
    }

    fn error(&self, module: &str, err: &dyn Error) {
        self.errors.borrow_mut().push(format!("[{}] {}", module, err));
    }
}

/// Wall-clock timestamp used to tag log lines.
#[cfg(target_arch = "wasm32")]
fn timestamp() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}ms", ms)
}
