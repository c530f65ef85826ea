//! Diagnostic sink for human-readable engine messages.
//!
//! The board reports resets, applied and rejected moves, bad history
//! indices, and internal-consistency faults through a caller-supplied
//! [`DiagnosticSink`]. [`TracingSink`] forwards to `tracing`.

use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Receives diagnostic messages from the engine.
pub trait DiagnosticSink: Send + Sync {
    /// Receives one message.
    fn log(&self, severity: Severity, text: &str);

    fn info(&self, text: &str) {
        self.log(Severity::Info, text);
    }

    fn warning(&self, text: &str) {
        self.log(Severity::Warning, text);
    }

    fn error(&self, text: &str) {
        self.log(Severity::Error, text);
    }
}

/// Forwards diagnostics to the `tracing` macros under the `chessrules` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "chessrules", "{}", text),
            Severity::Warning => tracing::warn!(target: "chessrules", "{}", text),
            Severity::Error => tracing::error!(target: "chessrules", "{}", text),
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _severity: Severity, _text: &str) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every message for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        entries: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingSink {
        pub fn entries(&self) -> Vec<(Severity, String)> {
            self.entries.lock().unwrap().clone()
        }

        pub fn count(&self, severity: Severity) -> usize {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter(|(s, _)| *s == severity)
                .count()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn log(&self, severity: Severity, text: &str) {
            self.entries
                .lock()
                .unwrap()
                .push((severity, text.to_string()));
        }
    }
}
