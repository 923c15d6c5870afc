//! Shared E2E test helpers for `gio-activity` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables that would leak the caller's setup into a test run.
const GIO_ENV_VARS: &[&str] = &["GIO_DEBUG", "GIO_HOST_VERSION", "GIO_LOG_LEVEL", "RUST_LOG"];

/// Build a Command for the `gio-activity` binary with an isolated home.
///
/// `HOME` points at a fresh temp directory so no global config is read.
/// Returns (command, _guard); keep the guard alive for the test's duration.
pub fn gio_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let home = tempfile::tempdir().expect("create temp dir for home");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("gio-activity");
    cmd.timeout(TIMEOUT_BASIC);
    for var in GIO_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home.path());
    cmd.current_dir(home.path());
    (cmd, home)
}
