//! Copy a working file over its stable baseline.

use std::path::Path;

use serde::Serialize;

use crate::commands::Outcome;
use crate::config::StableConfig;
use crate::confirm::{self, Confirm};
use crate::error::{display_path, Result, StableError};
use crate::paths::SnapshotPaths;

/// Report from a promote operation.
#[derive(Debug, Serialize)]
pub struct PromoteReport {
    /// Working file, relative to the root.
    pub working: String,
    /// Stable file that was (or would have been) written, relative to the root.
    pub stable: String,
    /// Whether confirmation was skipped with `--force`.
    pub forced: bool,
    /// Number of bytes copied into the stable file (0 when declined).
    pub bytes_written: u64,
    pub outcome: Outcome,
}

/// Execute the promote command.
///
/// 1. Fail if the working file is missing
/// 2. Ask for confirmation unless forced
/// 3. Write the working file's bytes to the stable path
pub fn execute(
    config: &StableConfig,
    working: &Path,
    force: bool,
    confirm: &mut dyn Confirm,
) -> Result<PromoteReport> {
    let paths = SnapshotPaths::derive(working, &config.naming);
    let working_display = display_path(&paths.working, &config.root);
    let stable_display = display_path(&paths.stable, &config.root);

    if !paths.working.is_file() {
        return Err(StableError::WorkingFileMissing {
            path: working_display,
        });
    }

    let mut report = PromoteReport {
        working: working_display,
        stable: stable_display,
        forced: force,
        bytes_written: 0,
        outcome: Outcome::Declined,
    };

    let prompt = format!("Promote {} → {}?", report.working, report.stable);
    if !confirm::gate(confirm, force, &prompt)? {
        log::debug!("Promote declined; working={}", report.working);
        return Ok(report);
    }

    let contents = std::fs::read(&paths.working)?;
    std::fs::write(&paths.stable, &contents)?;

    report.bytes_written = contents.len() as u64;
    report.outcome = Outcome::Applied;
    log::debug!(
        "Promoted working file; working={}, stable={}, bytes={}",
        report.working,
        report.stable,
        report.bytes_written
    );
    Ok(report)
}
