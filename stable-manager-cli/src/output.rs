//! Terminal output formatting for all stable-manager commands.
//! Uses comfy-table for the tracked-file listing and colored for
//! status lines.

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use stable_manager_core::{
    CleanReport, ListReport, Outcome, PromoteReport, RestoreReport, TrackedKind,
};

fn print_aborted() {
    println!("{}", "Aborted.".yellow());
}

/// Print a promote report.
pub fn print_promote_result(report: &PromoteReport) {
    if report.outcome == Outcome::Declined {
        print_aborted();
        return;
    }

    let forced = if report.forced { " (forced)" } else { "" };
    println!(
        "{}",
        format!("Stable version created/updated{}: {}", forced, report.stable)
            .green()
            .bold()
    );
    println!(
        "  {} {} {} {}",
        report.working,
        "→".green(),
        report.stable,
        format_size(report.bytes_written).dimmed()
    );
}

/// Print a restore report.
pub fn print_restore_result(report: &RestoreReport) {
    if report.outcome == Outcome::Declined {
        print_aborted();
        return;
    }

    if let Some(ref backup) = report.backup {
        println!("{} {}", "Backup saved:".cyan(), backup);
    }
    let forced = if report.forced { " (forced)" } else { "" };
    println!(
        "{}",
        format!("Working version restored{}: {}", forced, report.working)
            .green()
            .bold()
    );
}

/// Print files removed by clean.
pub fn print_clean_result(report: &CleanReport) {
    match report.outcome {
        Outcome::NothingToDo => {
            println!("{}", "No stable/backup files to remove.".green());
            return;
        }
        Outcome::Declined => {
            print_aborted();
            return;
        }
        Outcome::Applied | Outcome::Incomplete => {}
    }

    for item in &report.removed {
        println!("  {} Removed: {}", "✗".red(), item);
    }
    for failure in &report.failed {
        println!(
            "{} could not remove {}: {}",
            "WARNING:".yellow().bold(),
            failure.path,
            failure.reason
        );
    }

    if report.failed.is_empty() {
        println!(
            "{}",
            format!("Clean complete. Removed {} file(s).", report.removed.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "Clean finished with warnings. Removed {} file(s), {} could not be removed.",
                report.removed.len(),
                report.failed.len()
            )
            .yellow()
            .bold()
        );
    }
}

/// Format tracked files as a table.
pub fn print_list(report: &ListReport) {
    if report.files.is_empty() {
        println!("{}", "No stable/backup files found.".yellow());
        if !report.deep {
            println!("{}", "Hint: pass --deep to include subdirectories.".dimmed());
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Kind"),
            Cell::new("Path"),
            Cell::new("Size"),
            Cell::new("Modified"),
        ]);

    for file in &report.files {
        let kind = match file.kind {
            TrackedKind::Stable => Cell::new("stable").fg(Color::Green),
            TrackedKind::Backup => Cell::new("backup").fg(Color::Cyan),
        };
        let modified = file
            .modified
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default();

        table.add_row(vec![
            kind,
            Cell::new(file.path.display()),
            Cell::new(format_size(file.size_bytes)),
            Cell::new(&modified),
        ]);
    }

    println!(
        "{}",
        format!(
            "{} tracked file(s) in {}{}:",
            report.files.len(),
            report.directory,
            if report.deep { " (deep)" } else { "" }
        )
        .bold()
    );
    println!("{table}");
}

fn format_size(bytes: u64) -> String {
    if bytes > 1024 * 1024 {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes > 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}
