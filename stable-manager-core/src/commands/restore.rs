//! Copy a stable baseline back over its working file, keeping a backup.

use std::path::Path;

use serde::Serialize;

use crate::commands::Outcome;
use crate::config::StableConfig;
use crate::confirm::{self, Confirm};
use crate::error::{display_path, Result, StableError};
use crate::paths::SnapshotPaths;

/// Report from a restore operation.
#[derive(Debug, Serialize)]
pub struct RestoreReport {
    /// Working file that was (or would have been) overwritten, relative to the root.
    pub working: String,
    /// Stable file restored from, relative to the root.
    pub stable: String,
    /// Backup written before overwriting; `None` if the working file did not exist
    /// or the restore was declined.
    pub backup: Option<String>,
    /// Whether confirmation was skipped with `--force`.
    pub forced: bool,
    pub outcome: Outcome,
}

/// Execute the restore command.
///
/// 1. Fail if no stable file exists
/// 2. Ask for confirmation unless forced
/// 3. Copy the current working file to the backup path, if it exists
/// 4. Copy the stable file onto the working path
pub fn execute(
    config: &StableConfig,
    working: &Path,
    force: bool,
    confirm: &mut dyn Confirm,
) -> Result<RestoreReport> {
    let paths = SnapshotPaths::derive(working, &config.naming);
    let stable_display = display_path(&paths.stable, &config.root);

    if !paths.stable.is_file() {
        return Err(StableError::NoStableFile {
            path: stable_display,
        });
    }

    let mut report = RestoreReport {
        working: display_path(&paths.working, &config.root),
        stable: stable_display,
        backup: None,
        forced: force,
        outcome: Outcome::Declined,
    };

    let prompt = format!(
        "Restore {} → {} (backup will be saved)?",
        report.stable, report.working
    );
    if !confirm::gate(confirm, force, &prompt)? {
        log::debug!("Restore declined; working={}", report.working);
        return Ok(report);
    }

    if paths.working.exists() {
        std::fs::copy(&paths.working, &paths.backup)?;
        let backup = display_path(&paths.backup, &config.root);
        log::debug!("Saved backup; working={}, backup={}", report.working, backup);
        report.backup = Some(backup);
    }

    std::fs::copy(&paths.stable, &paths.working)?;
    report.outcome = Outcome::Applied;
    log::debug!(
        "Restored working file; stable={}, working={}",
        report.stable,
        report.working
    );
    Ok(report)
}
