//! Shared E2E test helpers for `guarda` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables the loader reads; removed so the host environment cannot leak in.
const GUARDA_VARS: &[&str] = &["GUARDA_DEBUG", "GUARDA_HOME_PATH", "GUARDA_DENIED_MESSAGE", "RUST_LOG"];

/// Build a Command for the `guarda` binary rooted in a fresh project dir.
///
/// Returns (command, _guard). Keep the guard alive for the whole test.
pub fn guarda_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let cmd = guarda_cmd_in(&tmp);
    (cmd, tmp)
}

/// Build a Command rooted in `dir` that never reads `~/.guarda/config.toml`.
///
/// The global config points at a file inside `dir` that tests do not create.
pub fn guarda_cmd_in(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = bare_cmd_in(dir);
    let no_global = dir.path().join(NO_GLOBAL_CONFIG);
    cmd.args(["--config", no_global.to_str().expect("valid utf8")]);
    cmd
}

/// File name `guarda_cmd_in` passes as the global config.
const NO_GLOBAL_CONFIG: &str = "no-global.toml";

/// Build a Command whose project root is `dir`, with no global config flag.
///
/// Callers pass `--config` or `--isolated` themselves.
pub fn bare_cmd_in(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("guarda");
    cmd.timeout(TIMEOUT_BASIC);
    for var in GUARDA_VARS {
        cmd.env_remove(var);
    }
    cmd.args(["-C", dir.path().to_str().expect("valid utf8")]);
    cmd
}

/// Writes `content` to `<dir>/<name>` and returns its path as a string.
pub fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, content).expect("write test file");
    path.to_str().expect("valid utf8").to_string()
}

/// Salesperson owning their leads; the reference principal of most tests.
pub const SALESPERSON: &str = r#"{
    "id": "42",
    "role": "vendedor",
    "permissions": {"leads": {"view": "own", "edit": "own", "delete": false}}
}"#;
