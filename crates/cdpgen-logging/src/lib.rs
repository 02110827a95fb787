//! cdpgen-logging - Tracing setup and run diagnostics
//!
//! This crate provides:
//! - [`init_logging`] installing the stderr subscriber
//! - [`DiagnosticsLayer`] counting warnings and errors into [`Diagnostics`]
//! - [`ReloadHandle`] for changing the level once the config file is read

mod diagnostics;
mod layer;
mod reload;

pub use cdpgen_core::LogLevel;
pub use diagnostics::{Diagnostics, DiagnosticsSummary};
pub use layer::{DiagnosticsLayer, init_logging};
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Diagnostics, DiagnosticsLayer, LogLevel, ReloadHandle, init_logging};
}
