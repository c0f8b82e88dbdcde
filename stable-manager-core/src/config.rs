//! Configuration loading and resolution.
//!
//! Supports a TOML config file, environment variables, and CLI overrides
//! with a defined priority order (CLI > env > TOML > defaults).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StableError};
use crate::paths::{self, Naming};
use crate::scanner::ScanOptions;

/// Name of the optional config file looked up in the resolution root.
pub const CONFIG_FILE_NAME: &str = "stable-manager.toml";

/// Helper macro to apply an optional owned value directly to a target field.
///
/// Replaces: `if let Some(v) = $opt { $target = v; }`
macro_rules! apply_option {
    ($opt:expr => $target:expr) => {
        if let Some(v) = $opt {
            $target = v;
        }
    };
}

/// Helper macro to clone a borrowed optional value directly to a target field.
///
/// Replaces: `if let Some(ref v) = $opt { $target = v.clone(); }`
macro_rules! apply_option_clone {
    ($opt:expr => $target:expr) => {
        if let Some(ref v) = $opt {
            $target = v.clone();
        }
    };
}

/// Top-level configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct StableConfig {
    /// Resolution root: base for relative path display and the default scan start.
    pub root: PathBuf,
    /// Suffixes used to derive stable and backup sibling paths.
    pub naming: Naming,
    /// Directory traversal settings for `list` and `clean`.
    pub scan: ScanOptions,
}

impl StableConfig {
    /// Build a config with defaults rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            naming: Naming::default(),
            scan: ScanOptions::default(),
        }
    }
}

// ── TOML deserialization structs ──

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    naming: Option<TomlNaming>,
    scan: Option<TomlScan>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlNaming {
    stable_suffix: Option<String>,
    backup_suffix: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlScan {
    exclude: Option<Vec<String>>,
    include_hidden: Option<bool>,
}

/// CLI overrides that take highest priority.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Explicit config file path; an error if it does not exist.
    pub config: Option<PathBuf>,
    /// Explicit resolution root; skips the upward marker search.
    pub root: Option<PathBuf>,
    /// Replace the excluded directory names.
    pub exclude: Option<Vec<String>>,
}

impl StableConfig {
    /// Load configuration for a process started in `cwd`, reading the real
    /// environment.
    ///
    /// Priority (highest wins):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. TOML config file
    /// 4. Built-in defaults
    pub fn load(cwd: &Path, overrides: &CliOverrides) -> Result<Self> {
        Self::load_with_env(cwd, overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`StableConfig::load`], with environment lookups routed
    /// through `env`.
    pub fn load_with_env<F>(cwd: &Path, overrides: &CliOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit_root = overrides
            .root
            .clone()
            .or_else(|| env("STABLE_MANAGER_ROOT").map(PathBuf::from))
            .map(|r| cwd.join(r));
        let root = paths::resolve_root(explicit_root.as_deref(), cwd)?;
        log::debug!("Resolved project root; root={}", root.display());

        let mut config = StableConfig::with_root(root);

        // Layer 3: TOML config file
        let toml_path = match overrides.config {
            Some(ref p) => cwd.join(p),
            None => config.root.join(CONFIG_FILE_NAME),
        };
        match std::fs::read_to_string(&toml_path) {
            Ok(content) => {
                let toml_config: TomlConfig = toml::from_str(&content).map_err(|e| {
                    StableError::ConfigError(format!(
                        "Failed to parse config file '{}': {}",
                        toml_path.display(),
                        e
                    ))
                })?;
                log::debug!("Loaded config file; path={}", toml_path.display());
                config.apply_toml(toml_config);
            }
            Err(_) if overrides.config.is_some() => {
                return Err(StableError::ConfigError(format!(
                    "Config file '{}' not found",
                    toml_path.display()
                )));
            }
            Err(_) => {}
        }

        // Layer 2: Environment variables
        config.apply_env(&env);

        // Layer 1: CLI overrides
        config.apply_cli(overrides);

        config.naming.validate()?;
        Ok(config)
    }

    fn apply_toml(&mut self, toml: TomlConfig) {
        if let Some(n) = toml.naming {
            apply_option!(n.stable_suffix => self.naming.stable_suffix);
            apply_option!(n.backup_suffix => self.naming.backup_suffix);
        }

        if let Some(s) = toml.scan {
            apply_option!(s.exclude => self.scan.exclude);
            apply_option!(s.include_hidden => self.scan.include_hidden);
        }
    }

    fn apply_env<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("STABLE_MANAGER_STABLE_SUFFIX") {
            self.naming.stable_suffix = v;
        }
        if let Some(v) = env("STABLE_MANAGER_BACKUP_SUFFIX") {
            self.naming.backup_suffix = v;
        }
        if let Some(v) = env("STABLE_MANAGER_EXCLUDE") {
            self.scan.exclude = split_list(&v);
        }
        if let Some(v) = env("STABLE_MANAGER_INCLUDE_HIDDEN") {
            self.scan.include_hidden = v == "1" || v.eq_ignore_ascii_case("true");
        }
    }

    fn apply_cli(&mut self, overrides: &CliOverrides) {
        apply_option_clone!(overrides.exclude => self.scan.exclude);
    }
}

/// Split a comma-separated list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
