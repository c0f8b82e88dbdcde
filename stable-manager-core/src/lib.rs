//! Paired working/stable file snapshots inside a project tree.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stable_manager_core::config::{CliOverrides, StableConfig};
//! use stable_manager_core::confirm::Interactive;
//! use stable_manager_core::StableManager;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cwd = std::env::current_dir()?;
//! let config = StableConfig::load(&cwd, &CliOverrides::default())?;
//! let manager = StableManager::new(config);
//! let report = manager.promote(&cwd.join("src/app.js"), false, &mut Interactive::stdio(false))?;
//! println!("Promoted to {}", report.stable);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`] — Configuration loading (TOML, env vars, CLI overrides)
//! - [`paths`] — Stable/backup sibling derivation and root resolution
//! - [`scanner`] — Directory traversal for stable/backup files
//! - [`confirm`] — Yes/no confirmation gate
//! - [`commands`] — promote, restore, clean, list
//! - [`error`] — Error types

pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod paths;
pub mod scanner;

use std::path::Path;

use config::StableConfig;
use confirm::Confirm;
use error::Result;

pub use commands::clean::CleanReport;
pub use commands::list::ListReport;
pub use commands::promote::PromoteReport;
pub use commands::restore::RestoreReport;
pub use commands::Outcome;
pub use config::CliOverrides;
pub use scanner::{TrackedFile, TrackedKind};

/// Main entry point for the library.
///
/// Holds the configuration resolved at startup and runs commands against it.
pub struct StableManager {
    pub config: StableConfig,
}

impl StableManager {
    pub fn new(config: StableConfig) -> Self {
        Self { config }
    }

    /// Resolution root all reported paths are relative to.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Copy `working` over its stable file.
    pub fn promote(
        &self,
        working: &Path,
        force: bool,
        confirm: &mut dyn Confirm,
    ) -> Result<PromoteReport> {
        commands::promote::execute(&self.config, working, force, confirm)
    }

    /// Copy the stable file back over `working`, backing up the current content.
    pub fn restore(
        &self,
        working: &Path,
        force: bool,
        confirm: &mut dyn Confirm,
    ) -> Result<RestoreReport> {
        commands::restore::execute(&self.config, working, force, confirm)
    }

    /// Remove all stable and backup files under the root.
    pub fn clean(&self, force: bool, confirm: &mut dyn Confirm) -> Result<CleanReport> {
        commands::clean::execute(&self.config, force, confirm)
    }

    /// List stable and backup files in `dir` (default: the root).
    pub fn list(&self, dir: Option<&Path>, deep: bool) -> Result<ListReport> {
        commands::list::execute(&self.config, dir, deep)
    }
}
