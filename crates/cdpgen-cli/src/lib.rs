//! cdpgen-cli - Go binding generator for the Chrome DevTools Protocol
//!
//! This crate provides:
//! - [`codegen`] turning a merged [`cdpgen_core::Protocol`] into Go files
//! - [`materialize`] formatting and writing those files
//! - [`verify`] running the post-generation build check
//! - [`config`] for command-line and `cdpgen.toml` settings
//! - [`generate`] tying one run together

pub mod codegen;
pub mod config;
pub mod generate;
pub mod materialize;
pub mod verify;

pub use config::{CliArgs, GeneratorConfig, Settings};
pub use generate::RunSummary;
