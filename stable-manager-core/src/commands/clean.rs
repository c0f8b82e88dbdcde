//! Remove every stable and backup file under the resolution root.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::commands::Outcome;
use crate::config::StableConfig;
use crate::confirm::{self, Confirm};
use crate::error::Result;
use crate::scanner::{self, TrackedFile};

/// A file that could not be removed.
#[derive(Debug, Serialize)]
pub struct CleanFailure {
    pub path: String,
    pub reason: String,
}

/// Report from a clean operation.
#[derive(Debug, Serialize)]
pub struct CleanReport {
    /// Number of stable/backup files discovered.
    pub found: usize,
    /// Files removed, in the order they were deleted.
    pub removed: Vec<String>,
    /// Files whose removal failed; the run continues past them.
    pub failed: Vec<CleanFailure>,
    /// Whether confirmation was skipped with `--force`.
    pub forced: bool,
    pub outcome: Outcome,
}

/// Execute the clean command.
///
/// Scans recursively from the root, asks once for the whole batch, then
/// removes files one by one.
pub fn execute(
    config: &StableConfig,
    force: bool,
    confirm: &mut dyn Confirm,
) -> Result<CleanReport> {
    let files = scanner::scan(
        &config.root,
        &config.root,
        &config.naming,
        &config.scan,
        true,
    )?;

    let mut report = CleanReport {
        found: files.len(),
        removed: Vec::new(),
        failed: Vec::new(),
        forced: force,
        outcome: Outcome::NothingToDo,
    };

    if files.is_empty() {
        return Ok(report);
    }

    let prompt = format!("Remove ALL stable/backup files ({} found)?", files.len());
    if !confirm::gate(confirm, force, &prompt)? {
        report.outcome = Outcome::Declined;
        return Ok(report);
    }

    remove_files(&config.root, files, &mut report, |path| std::fs::remove_file(path));
    Ok(report)
}

/// Remove each file with `remove`, recording failures and carrying on.
fn remove_files<F>(root: &Path, files: Vec<TrackedFile>, report: &mut CleanReport, mut remove: F)
where
    F: FnMut(&Path) -> io::Result<()>,
{
    for file in files {
        let display = file.path.display().to_string();
        match remove(&root.join(&file.path)) {
            Ok(()) => {
                log::debug!("Removed file; path={}", display);
                report.removed.push(display);
            }
            Err(e) => {
                log::warn!("Failed to remove file, continuing; path={}, error={}", display, e);
                report.failed.push(CleanFailure {
                    path: display,
                    reason: e.to_string(),
                });
            }
        }
    }

    report.outcome = if report.failed.is_empty() {
        Outcome::Applied
    } else {
        Outcome::Incomplete
    };
}
