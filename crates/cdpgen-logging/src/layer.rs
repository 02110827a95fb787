//! Subscriber setup and the diagnostics layer

use crate::diagnostics::Diagnostics;
use crate::reload::ReloadHandle;
use cdpgen_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that counts warnings and errors for the run summary
///
/// Sits beside the stderr formatter rather than behind its filter, so a
/// quiet log level still yields accurate counts.
pub struct DiagnosticsLayer {
    diagnostics: &'static Diagnostics,
}

impl DiagnosticsLayer {
    /// Create a layer recording into the global diagnostics
    pub fn new() -> Self {
        Self {
            diagnostics: Diagnostics::global(),
        }
    }

    /// Create a layer recording into a specific diagnostics instance
    pub fn with_diagnostics(diagnostics: &'static Diagnostics) -> Self {
        Self { diagnostics }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for DiagnosticsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if level < LogLevel::Warn {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.diagnostics
            .record(level, metadata.target(), &visitor.finish());
    }
}

/// Collects the message and any structured fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    /// `message key=value ...`
    fn finish(self) -> String {
        let mut text = self.message.unwrap_or_default();
        for field in self.fields {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&field);
        }
        text
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Filter for `level`, unless `RUST_LOG` says otherwise
pub(crate) fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Initialize logging: compact stderr output plus the diagnostics layer.
///
/// Call once at startup. A second call leaves the first subscriber in place.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::reload;

    let (filter, handle) = reload::Layer::new(build_filter(level));
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter);

    let subscriber = tracing_subscriber::registry()
        .with(stderr)
        .with(DiagnosticsLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().set_handle(handle);
    }
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
