//! Command-line arguments, `cdpgen.toml` and their merge into [`Settings`]
//!
//! Precedence is CLI flag, then config file, then built-in default.

use anyhow::{Context, Result};
use cdpgen_core::LogLevel;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_IMPORT: &str = "github.com/mafredri/cdp";
pub const DEFAULT_BROWSER_PROTO: &str = "protodef/browser_protocol.json";
pub const DEFAULT_JS_PROTO: &str = "protodef/js_protocol.json";
pub const DEFAULT_GOFMT: &str = "gofmt";
pub const DEFAULT_VERIFY_COMMAND: &str = "go build ./...";

/// Generate Go bindings for the Chrome DevTools Protocol
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cdpgen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Output directory for the generated packages
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Go import path the output directory is importable as
    #[arg(long)]
    pub import: Option<String>,

    /// Browser protocol description
    #[arg(long)]
    pub browser_proto: Option<PathBuf>,

    /// JavaScript protocol description
    #[arg(long)]
    pub js_proto: Option<PathBuf>,

    /// Path to a cdpgen.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the post-generation build check
    #[arg(long)]
    pub no_verify: bool,

    /// Write sources without running the formatter
    #[arg(long)]
    pub no_format: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

/// `cdpgen.toml` structure; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub dest: Option<PathBuf>,

    #[serde(default)]
    pub import: Option<String>,

    #[serde(default)]
    pub browser_proto: Option<PathBuf>,

    #[serde(default)]
    pub js_proto: Option<PathBuf>,

    /// Formatter program, run with the source on stdin
    #[serde(default)]
    pub gofmt: Option<String>,

    /// Command run in the output directory after generation
    #[serde(default)]
    pub verify_command: Option<String>,

    #[serde(default)]
    pub log_level: Option<String>,
}

impl GeneratorConfig {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse config from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dest: PathBuf,
    pub import: String,
    pub browser_proto: PathBuf,
    pub js_proto: PathBuf,

    /// `None` when formatting is disabled
    pub gofmt: Option<String>,

    /// Program and arguments; `None` when verification is disabled
    pub verify_command: Option<Vec<String>>,

    pub log_level: LogLevel,
}

impl Settings {
    /// Merge CLI arguments over the config file over defaults.
    ///
    /// Fails if `dest` is given nowhere, or if a config value is invalid.
    pub fn resolve(cli: &CliArgs, file: GeneratorConfig) -> Result<Self> {
        let Some(dest) = cli.dest.clone().or(file.dest) else {
            anyhow::bail!("No output directory: pass --dest or set `dest` in the config file");
        };

        let log_level = match (cli.log_level, file.log_level.as_deref()) {
            (Some(level), _) => level,
            (None, Some(raw)) => LogLevel::from_str(raw).context("Invalid `log_level` in config")?,
            (None, None) => LogLevel::Info,
        };

        let gofmt = if cli.no_format {
            None
        } else {
            Some(file.gofmt.unwrap_or_else(|| DEFAULT_GOFMT.to_string()))
        };

        let verify_command = if cli.no_verify {
            None
        } else {
            let raw = file
                .verify_command
                .unwrap_or_else(|| DEFAULT_VERIFY_COMMAND.to_string());
            let argv: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
            if argv.is_empty() {
                anyhow::bail!("`verify_command` cannot be empty; use --no-verify to skip");
            }
            Some(argv)
        };

        Ok(Self {
            dest,
            import: cli
                .import
                .clone()
                .or(file.import)
                .unwrap_or_else(|| DEFAULT_IMPORT.to_string()),
            browser_proto: cli
                .browser_proto
                .clone()
                .or(file.browser_proto)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BROWSER_PROTO)),
            js_proto: cli
                .js_proto
                .clone()
                .or(file.js_proto)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_JS_PROTO)),
            gofmt,
            verify_command,
            log_level,
        })
    }

    /// Load the config file named by `--config`, if any, and merge
    pub fn load(cli: &CliArgs) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        Self::resolve(cli, file)
    }
}
