//! CLI entry point for stable-manager.
//! Provides clap-based command routing for promote/restore/clean/list,
//! help and version handling, and exit code mapping based on error type.

mod output;

use std::path::PathBuf;
use std::process;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use stable_manager_core::config::{split_list, CliOverrides, StableConfig, CONFIG_FILE_NAME};
use stable_manager_core::confirm::Interactive;
use stable_manager_core::error::StableError;
use stable_manager_core::paths::resolve_arg;
use stable_manager_core::StableManager;

/// Version descriptor baked in at build time; parts git could not supply read "unknown".
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_TIME"),
    ")"
);

const AFTER_HELP: &str = "\
Examples:
  stable-manager promote src/core/snap-core.js
  stable-manager restore src/core/snap-core.js
  stable-manager list src --deep
  stable-manager clean

--force skips confirmations (use with care!)
Tip: 'restore' creates backups automatically. Use 'clean' to remove all stables and backups.";

/// Top-level CLI definition with global flags and subcommand dispatch.
#[derive(Parser)]
#[command(
    name = "stable-manager",
    about = "Promote working files to stable baselines and restore them",
    version = VERSION,
    after_help = AFTER_HELP
)]
struct Cli {
    /// Config file path (default: stable-manager.toml in the project root)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<String>,

    /// Project root (skips the upward search for project markers)
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<String>,

    /// Directory names never scanned, comma-separated (overrides config)
    #[arg(long, value_name = "NAMES", global = true)]
    exclude: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable verbose/debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// All available stable-manager subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Copy working → stable (creates/updates <file>-stable.<ext>)
    Promote {
        /// Working file to promote
        #[arg(value_name = "FILE", allow_hyphen_values = true)]
        file: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy stable → working (saves <file>-backup.<ext> first)
    Restore {
        /// Working file to restore
        #[arg(value_name = "FILE", allow_hyphen_values = true)]
        file: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Remove all stable and backup files under the project root
    Clean {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List stable and backup files
    List {
        /// Directory to list (default: project root)
        #[arg(value_name = "DIR")]
        dir: Option<String>,
        /// Include subdirectories
        #[arg(long)]
        deep: bool,
    },

    /// Show version
    #[command(alias = "v")]
    Version,
}

/// Clap command with `-v/--version` (also `--v`) in place of the default `-V`.
fn cli_command() -> clap::Command {
    Cli::command().disable_version_flag(true).arg(
        Arg::new("show_version")
            .short('v')
            .long("version")
            .alias("v")
            .action(ArgAction::SetTrue)
            .help("Print version"),
    )
}

fn main() {
    let matches = match cli_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            report_unknown_command(&e);
            process::exit(1);
        }
        Err(e) => e.exit(),
    };
    let show_version = matches.get_flag("show_version");
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Set up logging (suppress when JSON output is requested)
    let filter = if cli.json {
        "error"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::new()
        .parse_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli, show_version) {
        print_error(&e);
        process::exit(exit_code(&e));
    }
}

/// Map error types to exit codes.
fn exit_code(error: &StableError) -> i32 {
    match error {
        StableError::ConfigError(_) => 2,
        _ => 1,
    }
}

/// Resolve configuration and dispatch the chosen subcommand.
fn run(cli: Cli, show_version: bool) -> Result<(), StableError> {
    let json_output = cli.json;

    // === Commands that don't touch the project ===

    if show_version {
        return print_version(json_output);
    }

    let command = match cli.command {
        Some(Commands::Version) => return print_version(json_output),
        Some(Commands::Promote { ref file, .. }) | Some(Commands::Restore { ref file, .. })
            if usable_path_arg(file.as_deref()).is_none() =>
        {
            return print_help();
        }
        Some(command) => command,
        None => return print_help(),
    };

    // === Commands that need the project root ===

    let cwd = std::env::current_dir()?;
    let overrides = CliOverrides {
        config: cli.config.map(PathBuf::from),
        root: cli.root.map(PathBuf::from),
        exclude: cli.exclude.as_deref().map(split_list),
    };
    let config = StableConfig::load(&cwd, &overrides)?;
    log::debug!(
        "Configuration resolved; root={}, exclude={:?}",
        config.root.display(),
        config.scan.exclude
    );
    let manager = StableManager::new(config);
    // Keep stdout parseable when it carries a JSON report.
    let mut confirm = Interactive::stdio(json_output);

    match command {
        Commands::Promote { file, force } => {
            let file = usable_path_arg(file.as_deref()).unwrap_or_default();
            let report = manager.promote(&resolve_arg(&cwd, file), force, &mut confirm)?;
            if json_output {
                print_json(&report)?;
            } else {
                output::print_promote_result(&report);
            }
        }
        Commands::Restore { file, force } => {
            let file = usable_path_arg(file.as_deref()).unwrap_or_default();
            let report = manager.restore(&resolve_arg(&cwd, file), force, &mut confirm)?;
            if json_output {
                print_json(&report)?;
            } else {
                output::print_restore_result(&report);
            }
        }
        Commands::Clean { force } => {
            let report = manager.clean(force, &mut confirm)?;
            if json_output {
                print_json(&report)?;
            } else {
                output::print_clean_result(&report);
            }
        }
        Commands::List { dir, deep } => {
            let dir = dir.map(|d| resolve_arg(&cwd, &d));
            let report = manager.list(dir.as_deref(), deep)?;
            if json_output {
                print_json(&report)?;
            } else {
                output::print_list(&report);
            }
        }
        Commands::Version => unreachable!("handled before config load"),
    }

    Ok(())
}

/// A file argument that is missing or looks like a flag means "show usage".
///
/// Unknown `--flags` land here as values because the file positional accepts
/// hyphen values; flags clap knows (like `--force`) are still parsed as flags.
fn usable_path_arg(arg: Option<&str>) -> Option<&str> {
    arg.filter(|a| !a.is_empty() && !a.starts_with("--"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), StableError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_help() -> Result<(), StableError> {
    cli_command().print_help()?;
    Ok(())
}

fn print_version(json_output: bool) -> Result<(), StableError> {
    if json_output {
        println!("{}", serde_json::json!({ "version": VERSION }));
    } else {
        println!("Stable Manager v{}", VERSION);
    }
    Ok(())
}

/// Name the unrecognized command on stderr, then fall back to the full help.
fn report_unknown_command(error: &clap::Error) {
    let name = match error.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => name.as_str(),
        _ => "",
    };
    eprintln!("{} Unknown command '{}'", "ERROR:".red().bold(), name);
    let _ = cli_command().print_help();
}

/// Print a formatted error message with actionable hints to stderr.
fn print_error(error: &StableError) {
    eprintln!("{} {}", "ERROR:".red().bold(), error);

    // Provide actionable guidance
    match error {
        StableError::NoStableFile { .. } => {
            eprintln!(
                "{}",
                "Hint: Run \"promote\" first to create a stable baseline.".dimmed()
            );
        }
        StableError::WorkingFileMissing { .. } => {
            eprintln!(
                "{}",
                "Hint: File paths are resolved relative to the current directory.".dimmed()
            );
        }
        StableError::DirectoryNotFound { .. } => {
            eprintln!(
                "{}",
                "Hint: Omit the directory to list from the project root.".dimmed()
            );
        }
        StableError::ConfigError(_) => {
            eprintln!(
                "{}",
                format!(
                    "Hint: Check your {} or the STABLE_MANAGER_* environment variables.",
                    CONFIG_FILE_NAME
                )
                .dimmed()
            );
        }
        _ => {}
    }
}
