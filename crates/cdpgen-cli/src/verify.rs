//! Post-generation build check

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Run `command` (program followed by arguments) inside `dest`.
///
/// A spawn failure or a non-zero exit is an error carrying the command's
/// stderr.
pub fn run(dest: &Path, command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("Verification command is empty");
    };
    let shown = command.join(" ");
    info!(command = %shown, dir = %dest.display(), "Verifying generated code");

    let output = Command::new(program)
        .args(args)
        .current_dir(dest)
        .output()
        .with_context(|| format!("Failed to execute verification command: {shown}"))?;

    if output.status.success() {
        info!("Verification passed");
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "Verification failed ({shown}, {}):\n{}",
            output.status,
            stderr.trim_end()
        );
    }
}
