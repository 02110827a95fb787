//! Writing generated files to disk.
//!
//! Each file is rendered, passed through a [`SourceFormatter`] and written
//! under the output root. A formatter failure is not fatal: the file is
//! written unformatted and a warning is logged. Directory and write
//! failures abort the run.

use crate::codegen::GoFile;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a source file could not be formatted
#[derive(Error, Debug)]
pub enum FormatError {
    /// The formatter could not be started or talked to
    #[error("failed to run formatter {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The formatter ran and rejected the source
    #[error("formatter {program} rejected the source: {stderr}")]
    Rejected { program: String, stderr: String },
}

/// Source-to-source formatter applied before writing
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Runs `gofmt` (or a compatible program) with the source on stdin
#[derive(Debug, Clone)]
pub struct GoFmt {
    program: String,
}

impl GoFmt {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl SourceFormatter for GoFmt {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.spawn_error(std::io::Error::other("stdin not captured")))?;

        // Fed from a separate thread so a full stdout pipe cannot stall the write.
        let input = source.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(FormatError::Rejected {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.spawn_error(e)),
            Err(_) => return Err(self.spawn_error(std::io::Error::other("stdin writer panicked"))),
        }

        String::from_utf8(output.stdout).map_err(|e| FormatError::Rejected {
            program: self.program.clone(),
            stderr: e.to_string(),
        })
    }
}

/// Leaves the source unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Counts from one [`Materializer::write_all`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,

    /// Written, but as emitted because the formatter failed
    pub unformatted: usize,

    /// Empty buffers not written at all
    pub skipped: usize,
}

/// Writes files under an output root
pub struct Materializer {
    root: PathBuf,
    formatter: Box<dyn SourceFormatter>,
}

impl Materializer {
    pub fn new(root: impl Into<PathBuf>, formatter: Box<dyn SourceFormatter>) -> Self {
        Self {
            root: root.into(),
            formatter,
        }
    }

    /// Write every file, in order
    pub fn write_all(&self, files: &[GoFile]) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        for file in files {
            self.write(file, &mut stats)?;
        }
        Ok(stats)
    }

    fn write(&self, file: &GoFile, stats: &mut WriteStats) -> Result<()> {
        let path = self.root.join(file.path());
        if file.is_empty() {
            debug!(path = %path.display(), "Skipping empty file");
            stats.skipped += 1;
            return Ok(());
        }

        let text = file.render();
        let text = match self.formatter.format(&text) {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Writing unformatted source");
                stats.unformatted += 1;
                text
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, text.as_bytes())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        debug!(path = %path.display(), bytes = text.len(), "Wrote file");
        stats.written += 1;
        Ok(())
    }
}
