//! cdpgen CLI - Generate Go bindings for the Chrome DevTools Protocol
//!
//! Reads the browser and JavaScript protocol descriptions, writes one Go
//! package per domain plus the top-level `cdp` package under `--dest`, and
//! runs a build check over the result.

use cdpgen_cli::{CliArgs, Settings, generate};
use cdpgen_core::LogLevel;
use cdpgen_logging::{Diagnostics, ReloadHandle, init_logging};
use clap::Parser;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    let initial = cli.log_level.unwrap_or(LogLevel::Info);
    init_logging(initial);

    let settings = Settings::load(&cli)?;
    if settings.log_level != initial
        && let Err(e) = ReloadHandle::global().reload_level(settings.log_level)
    {
        warn!(error = %e, "Could not apply configured log level");
    }

    let summary = generate::run(&settings)?;
    let diagnostics = Diagnostics::global();
    let counts = diagnostics.summary();
    info!(%summary, diagnostics = %counts, "Done");
    println!("Generated {summary} ({counts})");
    if let Some(report) = diagnostics.report() {
        print!("{report}");
    }

    Ok(())
}
