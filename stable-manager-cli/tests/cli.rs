use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn setup_test_project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();

    // A project marker so the root search stops here
    fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"test\"").unwrap();

    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("a/b.txt"), "working copy").unwrap();

    dir
}

/// The binary, run from `cwd` with a clean environment.
fn stable_manager(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stable-manager").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STABLE_MANAGER_ROOT")
        .env_remove("STABLE_MANAGER_STABLE_SUFFIX")
        .env_remove("STABLE_MANAGER_BACKUP_SUFFIX")
        .env_remove("STABLE_MANAGER_EXCLUDE")
        .env_remove("STABLE_MANAGER_INCLUDE_HIDDEN");
    cmd
}

#[test]
fn test_promote_forced() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "a/b.txt", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a/b-stable.txt"));

    assert_eq!(
        fs::read_to_string(dir.path().join("a/b-stable.txt")).unwrap(),
        "working copy"
    );
}

#[test]
fn test_promote_confirmed_interactively() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "a/b.txt"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Promote a/b.txt → a/b-stable.txt? (y/n)"))
        .stdout(predicate::str::contains("Stable version created/updated"));

    assert!(dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_promote_declined() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "a/b.txt"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(!dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_promote_closed_stdin_declines() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "a/b.txt"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(!dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_promote_missing_working_file() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "a/missing.txt", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Working file not found: a/missing.txt"));

    assert!(!dir.path().join("a/missing-stable.txt").exists());
}

#[test]
fn test_promote_without_file_shows_help() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_flag_shaped_file_argument_shows_help() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["promote", "--deep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));

    stable_manager(dir.path())
        .args(["restore", "--bogus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));

    assert!(!dir.path().join("a/b-stable.txt").exists());
    assert!(!dir.path().join("a/b-backup.txt").exists());
}

#[test]
fn test_promote_json_keeps_prompt_off_stdout() {
    let dir = setup_test_project();

    let output = stable_manager(dir.path())
        .args(["promote", "a/b.txt", "--json"])
        .write_stdin("y\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["stable"], "a/b-stable.txt");
    assert_eq!(report["outcome"], "applied");
    assert!(String::from_utf8_lossy(&output.stderr).contains("(y/n)"));
    assert!(dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_restore_without_stable_fails() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["restore", "a/b.txt"])
        .write_stdin("y\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No stable file exists yet"))
        .stderr(predicate::str::contains("promote"));

    assert!(!dir.path().join("a/b-backup.txt").exists());
    assert!(!dir.path().join("a/b-stable.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("a/b.txt")).unwrap(),
        "working copy"
    );
}

#[test]
fn test_restore_saves_backup() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "baseline").unwrap();

    stable_manager(dir.path())
        .args(["restore", "a/b.txt"])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved: a/b-backup.txt"))
        .stdout(predicate::str::contains("Working version restored"));

    assert_eq!(fs::read_to_string(dir.path().join("a/b.txt")).unwrap(), "baseline");
    assert_eq!(
        fs::read_to_string(dir.path().join("a/b-backup.txt")).unwrap(),
        "working copy"
    );
}

#[test]
fn test_restore_from_subdirectory_uses_cwd_relative_path() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "baseline").unwrap();

    stable_manager(&dir.path().join("a"))
        .args(["restore", "b.txt", "--force"])
        .assert()
        .success()
        // Paths are displayed relative to the project root.
        .stdout(predicate::str::contains("a/b.txt"));

    assert_eq!(fs::read_to_string(dir.path().join("a/b.txt")).unwrap(), "baseline");
}

#[test]
fn test_list_shallow() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), "").unwrap();
    fs::write(dir.path().join("x-stable.json"), "{}").unwrap();
    fs::write(dir.path().join("x-backup.json"), "{}").unwrap();
    fs::write(dir.path().join("y.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/z-stable.json"), "{}").unwrap();

    stable_manager(dir.path())
        .args(["list", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("x-stable.json"))
        .stdout(predicate::str::contains("x-backup.json"))
        .stdout(predicate::str::contains("y.json").not())
        .stdout(predicate::str::contains("z-stable.json").not());

    stable_manager(dir.path())
        .args(["list", "--deep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sub/z-stable.json"));
}

#[test]
fn test_list_json() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "s").unwrap();
    fs::write(dir.path().join("a/b-backup.txt"), "b").unwrap();

    let output = stable_manager(dir.path())
        .args(["list", "a", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["directory"], "a");
    assert_eq!(report["deep"], false);
    assert_eq!(report["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_empty() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stable/backup files found."));
}

#[test]
fn test_list_missing_directory() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .args(["list", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found: nowhere"));
}

#[test]
fn test_list_is_read_only_and_stable() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "s").unwrap();

    let first = stable_manager(dir.path())
        .args(["list", "--deep", "--json"])
        .output()
        .unwrap();
    let second = stable_manager(dir.path())
        .args(["list", "--deep", "--json"])
        .output()
        .unwrap();

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(fs::read_dir(dir.path().join("a")).unwrap().count(), 2);
}

#[test]
fn test_clean_forced_then_nothing_left() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "s").unwrap();
    fs::write(dir.path().join("a/b-backup.txt"), "b").unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/dep-stable.js"), "").unwrap();

    stable_manager(dir.path())
        .args(["clean", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: a/b-stable.txt"))
        .stdout(predicate::str::contains("Removed: a/b-backup.txt"));

    assert!(!dir.path().join("a/b-stable.txt").exists());
    assert!(!dir.path().join("a/b-backup.txt").exists());
    assert!(dir.path().join("a/b.txt").exists());
    assert!(dir.path().join("node_modules/dep-stable.js").exists());

    stable_manager(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stable/backup files to remove."));
}

#[test]
fn test_clean_declined() {
    let dir = setup_test_project();
    fs::write(dir.path().join("a/b-stable.txt"), "s").unwrap();

    stable_manager(dir.path())
        .arg("clean")
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 found)"))
        .stdout(predicate::str::contains("Aborted."));

    assert!(dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_clean_exclude_override() {
    let dir = setup_test_project();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/dep-stable.js"), "").unwrap();
    fs::write(dir.path().join("a/b-stable.txt"), "s").unwrap();

    stable_manager(dir.path())
        .args(["clean", "--force", "--exclude", "a"])
        .assert()
        .success();

    assert!(!dir.path().join("node_modules/dep-stable.js").exists());
    assert!(dir.path().join("a/b-stable.txt").exists());
}

#[test]
fn test_unknown_command() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command 'frobnicate'"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_command_shows_help() {
    let dir = setup_test_project();

    stable_manager(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("promote"))
        .stdout(predicate::str::contains("restore"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_version_forms() {
    let dir = setup_test_project();

    for arg in ["version", "v", "-v", "--v", "--version"] {
        stable_manager(dir.path())
            .arg(arg)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "Stable Manager v{}",
                env!("CARGO_PKG_VERSION")
            )));
    }
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = setup_test_project();
    fs::write(
        dir.path().join("stable-manager.toml"),
        "[naming]\nstable_suffix = \"-same\"\nbackup_suffix = \"-same\"\n",
    )
    .unwrap();

    stable_manager(dir.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}
