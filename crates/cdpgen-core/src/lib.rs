//! cdpgen-core - Schema model, naming and type resolution
//!
//! This crate provides the language-neutral half of the generator:
//! - [`Protocol`], [`Domain`], [`AnyType`], [`Command`], [`Event`] mirroring the schema
//! - [`naming::normalize`] for exported identifiers
//! - [`classify`] and [`resolve_reference`] for type classification
//! - [`cycles`] for the cycle-breaking table and import-graph checks
//! - [`Exemptions`] for types that are nullable by nature
//! - [`GenError`] for error handling

mod error;
mod exemptions;
mod resolve;
mod schema;

pub mod cycles;
pub mod naming;
pub mod text;

pub use error::{ErrorCategory, GenError, GenResult};
pub use exemptions::Exemptions;
pub use resolve::{
    Kind, ResolvedRef, Scope, TimestampUnit, TypeClass, classify, resolve_reference,
    timestamp_unit,
};
pub use schema::{AnyType, Command, Domain, EnumLiteral, Event, Protocol, Version};

use std::str::FromStr;

/// Log levels accepted on the command line and in `cdpgen.toml`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Lower-case name as understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(GenError::Config(format!("unknown log level: {other}"))),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnyType, Command, Domain, Event, Exemptions, GenError, GenResult, LogLevel, Protocol,
        ResolvedRef, Scope, TypeClass, classify, resolve_reference,
    };
}
