//! One generator run: load, generate, write, verify.

use crate::codegen;
use crate::config::Settings;
use crate::materialize::{GoFmt, Materializer, Passthrough, SourceFormatter, WriteStats};
use crate::verify;
use anyhow::{Context, Result};
use cdpgen_core::{ErrorCategory, Protocol};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub domains: usize,
    pub files: WriteStats,
    pub verified: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} domain(s), {} file(s) written, {} unformatted, {} empty skipped",
            self.domains, self.files.written, self.files.unformatted, self.files.skipped
        )?;
        if self.verified {
            write!(f, ", verified")?;
        }
        Ok(())
    }
}

/// Read one protocol description
pub fn read_protocol(path: &Path) -> Result<Protocol> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read protocol: {}", path.display()))?;
    Protocol::from_json(&content)
        .with_context(|| format!("Failed to parse protocol: {}", path.display()))
}

/// Read both descriptions and merge them, domains sorted by name
pub fn load_protocol(browser: &Path, js: &Path) -> Result<Protocol> {
    let protocol = Protocol::merge([read_protocol(browser)?, read_protocol(js)?]);
    info!(
        domains = protocol.domains.len(),
        version = ?protocol.version.as_ref().map(|v| format!("{}.{}", v.major, v.minor)),
        "Loaded protocol"
    );
    Ok(protocol)
}

/// Generate from `protocol` into `settings.dest` and verify the result
pub fn generate(protocol: &Protocol, settings: &Settings) -> Result<RunSummary> {
    let files = codegen::generate(protocol, &settings.import).map_err(|e| {
        let what = match e.category() {
            ErrorCategory::Schema => "Invalid protocol description",
            ErrorCategory::Defect => "Generator cannot emit valid code for this protocol",
            ErrorCategory::Config => "Invalid configuration",
        };
        anyhow::Error::new(e).context(what)
    })?;

    let formatter: Box<dyn SourceFormatter> = match &settings.gofmt {
        Some(program) => Box::new(GoFmt::new(program.clone())),
        None => Box::new(Passthrough),
    };
    let materializer = Materializer::new(&settings.dest, formatter);
    let stats = materializer.write_all(&files)?;

    let mut summary = RunSummary {
        domains: protocol.domains.len(),
        files: stats,
        verified: false,
    };
    info!(
        domains = summary.domains,
        written = stats.written,
        unformatted = stats.unformatted,
        skipped = stats.skipped,
        dest = %settings.dest.display(),
        "Wrote bindings"
    );

    if let Some(command) = &settings.verify_command {
        verify::run(&settings.dest, command)?;
        summary.verified = true;
    }
    Ok(summary)
}

/// Full run from resolved settings
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let protocol = load_protocol(&settings.browser_proto, &settings.js_proto)?;
    generate(&protocol, settings)
}
