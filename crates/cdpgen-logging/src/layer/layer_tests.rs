#![allow(non_snake_case)]

use super::*;
use tracing_subscriber::prelude::*;

fn leaked() -> &'static Diagnostics {
    Box::leak(Box::new(Diagnostics::new()))
}

#[test]
fn DiagnosticsLayer___convert_level___maps_every_level() {
    assert_eq!(DiagnosticsLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(DiagnosticsLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(DiagnosticsLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(DiagnosticsLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(DiagnosticsLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn DiagnosticsLayer___counts_only_warn_and_error() {
    let diagnostics = leaked();
    let subscriber =
        tracing_subscriber::registry().with(DiagnosticsLayer::with_diagnostics(diagnostics));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("domain emitted");
        tracing::debug!("file written");
        tracing::warn!("formatter failed");
        tracing::error!("verification failed");
    });

    assert_eq!(diagnostics.warnings(), 1);
    assert_eq!(diagnostics.errors(), 1);
}

#[test]
fn DiagnosticsLayer___structured_fields___appended_to_message() {
    let diagnostics = leaked();
    let subscriber =
        tracing_subscriber::registry().with(DiagnosticsLayer::with_diagnostics(diagnostics));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(file = "protocol/page/types.go", attempts = 1, "left unformatted");
    });

    let messages = diagnostics.messages();
    assert_eq!(messages.len(), 1);
    let msg = &messages[0];
    assert!(msg.contains("left unformatted"), "missing base text: {msg}");
    assert!(msg.contains("file=protocol/page/types.go"), "missing file field: {msg}");
    assert!(msg.contains("attempts=1"), "missing attempts field: {msg}");
}

#[test]
fn DiagnosticsLayer___message_only___no_extra_fields() {
    let diagnostics = leaked();
    let subscriber =
        tracing_subscriber::registry().with(DiagnosticsLayer::with_diagnostics(diagnostics));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("Simple message");
    });

    let messages = diagnostics.messages();
    assert!(messages[0].ends_with(": Simple message"), "got {}", messages[0]);
}

#[test]
fn DiagnosticsLayer___counts_even_when_formatter_filtered() {
    let diagnostics = leaked();
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(EnvFilter::new("error"));
    let subscriber = tracing_subscriber::registry()
        .with(stderr)
        .with(DiagnosticsLayer::with_diagnostics(diagnostics));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("quiet warning");
    });

    assert_eq!(diagnostics.warnings(), 1);
}

#[test]
fn MessageVisitor___finish___joins_message_and_fields() {
    let visitor = MessageVisitor {
        message: Some("written".to_string()),
        fields: vec!["bytes=12".to_string(), "path=a.go".to_string()],
    };

    assert_eq!(visitor.finish(), "written bytes=12 path=a.go");
}

#[test]
fn MessageVisitor___finish___fields_without_message() {
    let visitor = MessageVisitor {
        message: None,
        fields: vec!["bytes=12".to_string()],
    };

    assert_eq!(visitor.finish(), "bytes=12");
}
