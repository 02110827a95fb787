//! Run-wide warning and error counters

use cdpgen_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Global diagnostics instance
static DIAGNOSTICS: OnceCell<Diagnostics> = OnceCell::new();

/// Messages kept beyond this count are only counted.
const MAX_RETAINED: usize = 100;

/// Counts of warn/error events seen during a run
pub struct Diagnostics {
    warnings: AtomicUsize,
    errors: AtomicUsize,
    messages: Mutex<Vec<String>>,
}

/// Snapshot of [`Diagnostics`] counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticsSummary {
    pub warnings: usize,
    pub errors: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            warnings: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Get the global diagnostics instance
    pub fn global() -> &'static Diagnostics {
        DIAGNOSTICS.get_or_init(Diagnostics::new)
    }

    /// Record an event; levels below warn are ignored
    pub fn record(&self, level: LogLevel, target: &str, message: &str) {
        let counter = match level {
            LogLevel::Warn => &self.warnings,
            LogLevel::Error => &self.errors,
            _ => return,
        };
        counter.fetch_add(1, Ordering::SeqCst);

        let mut messages = self.messages.lock();
        if messages.len() < MAX_RETAINED {
            messages.push(format!("{level} {target}: {message}"));
        }
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Retained messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn summary(&self) -> DiagnosticsSummary {
        DiagnosticsSummary {
            warnings: self.warnings(),
            errors: self.errors(),
        }
    }

    /// Retained messages as an indented list, or `None` when nothing was recorded.
    ///
    /// Events past the retention cap are summarized in a final line.
    pub fn report(&self) -> Option<String> {
        let messages = self.messages.lock();
        if messages.is_empty() {
            return None;
        }
        let mut report = String::new();
        for message in messages.iter() {
            let _ = writeln!(report, "  {message}");
        }
        let omitted = (self.warnings() + self.errors()).saturating_sub(messages.len());
        if omitted > 0 {
            let _ = writeln!(report, "  ... and {omitted} more");
        }
        Some(report)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiagnosticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} warning(s), {} error(s)", self.warnings, self.errors)
    }
}
