//! E2E integration tests for the `guarda` binary.
//!
//! Command output goes to stdout; tracing goes to stderr.

mod common;

use common::{bare_cmd_in, guarda_cmd, guarda_cmd_in, write_file, SALESPERSON};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── check / any ───────────────────────────────────────────────────

#[test]
fn check_owned_lead() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);

    cmd.args(["check", &principal, "leads", "view", "--owner", "42"])
        .assert()
        .success()
        .stdout("allowed\n");
}

#[test]
fn check_foreign_lead_is_denied() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);

    cmd.args(["check", &principal, "leads", "view", "--owner", "99"])
        .assert()
        .success()
        .stdout("denied\n");
}

#[test]
fn check_strict_exits_with_failure() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);

    cmd.args(["check", &principal, "leads", "delete", "--strict"])
        .assert()
        .code(1)
        .stdout("denied\n");
}

#[test]
fn check_explain() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);

    cmd.args(["check", &principal, "leads", "view", "--explain"])
        .assert()
        .success()
        .stdout(contains("allowed (").and(contains("listing")));
}

#[test]
fn check_reads_principal_from_stdin() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["check", "-", "users", "delete"])
        .write_stdin(r#"{"id": 1, "role": "admin", "permissions": []}"#)
        .assert()
        .success()
        .stdout("allowed\n");
}

#[test]
fn malformed_permissions_warn_and_deny() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["check", "-", "leads", "view"])
        .write_stdin(r#"{"id": 3, "role": "gerente", "permissions": "all"}"#)
        .assert()
        .success()
        .stdout("denied\n")
        .stderr(contains("malformed permissions"));
}

#[test]
fn any_uses_section_visibility() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    cmd.args(["any", &principal, "leads"])
        .assert()
        .success()
        .stdout("allowed\n");

    let mut cmd = guarda_cmd_in(&tmp);
    cmd.args(["any", &principal, "users"])
        .assert()
        .success()
        .stdout("denied\n");
}

#[test]
fn missing_principal_file_fails() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["check", "/nonexistent/p.json", "leads", "view"])
        .assert()
        .failure()
        .stderr(contains("/nonexistent/p.json"));
}

// ─── guard ─────────────────────────────────────────────────────────

#[test]
fn guard_allow_and_access_denied() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    cmd.args(["guard", &principal, "leads", "view"])
        .assert()
        .success()
        .stdout("allow\n");

    let mut cmd = guarda_cmd_in(&tmp);
    cmd.args(["guard", &principal, "users", "view"])
        .assert()
        .success()
        .stdout("access-denied: Access denied\n");
}

#[test]
fn guard_fallback_wins_over_redirect() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    cmd.args([
        "guard", &principal, "users", "view", "--redirect", "/login", "--fallback", "hidden",
    ])
    .assert()
    .success()
    .stdout("fallback hidden\n");
}

#[test]
fn guard_home_uses_project_config_and_cli_override() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    write_file(
        &tmp,
        ".guarda/config.toml",
        "[gate]\nhome_path = \"/painel\"\ndenied_message = \"Sem acesso\"\n",
    );

    cmd.args(["guard", &principal, "users", "view", "--home"])
        .assert()
        .success()
        .stdout("redirect /painel\n");

    let mut cmd = guarda_cmd_in(&tmp);
    cmd.args(["--home-path", "/cli", "guard", &principal, "users", "view", "--home"])
        .assert()
        .success()
        .stdout("redirect /cli\n");

    let mut cmd = guarda_cmd_in(&tmp);
    cmd.args(["guard", &principal, "users", "view"])
        .assert()
        .success()
        .stdout("access-denied: Sem acesso\n");
}

#[test]
fn env_overrides_project_config() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    write_file(&tmp, ".guarda/config.toml", "[gate]\nhome_path = \"/painel\"\n");

    cmd.env("GUARDA_HOME_PATH", "/env")
        .args(["guard", &principal, "users", "view", "--home"])
        .assert()
        .success()
        .stdout("redirect /env\n");
}

#[test]
fn isolated_ignores_config_and_env() {
    let (mut cmd, tmp) = guarda_cmd_isolated();
    write_file(&tmp, ".guarda/config.toml", "[gate]\nhome_path = \"/painel\"\n");

    cmd.env("GUARDA_DENIED_MESSAGE", "env")
        .arg("config")
        .assert()
        .success()
        .stdout(contains("home_path = \"/\"").and(contains("Access denied")));
}

fn guarda_cmd_isolated() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let mut cmd = bare_cmd_in(&tmp);
    cmd.arg("--isolated");
    (cmd, tmp)
}

#[test]
fn project_config_resets_global_to_default() {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    let global = write_file(
        &tmp,
        "global.toml",
        "debug = true\n[gate]\nhome_path = \"/global\"\ndenied_message = \"Global\"\n",
    );
    write_file(
        &tmp,
        ".guarda/config.toml",
        "debug = false\n[gate]\nhome_path = \"/\"\n",
    );

    bare_cmd_in(&tmp)
        .args(["--config", &global, "guard", &principal, "users", "view", "--home"])
        .assert()
        .success()
        .stdout("redirect /\n");

    bare_cmd_in(&tmp)
        .args(["--config", &global, "config"])
        .assert()
        .success()
        .stdout(contains("debug = false").and(contains("denied_message = \"Global\"")));
}

#[test]
fn follow_up_commands_ignore_host_global_config() {
    let home = tempfile::tempdir().expect("create temp home dir");
    write_file(&home, ".guarda/config.toml", "[gate]\ndenied_message = \"Host\"\n");

    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    cmd.env("HOME", home.path())
        .args(["guard", &principal, "users", "view"])
        .assert()
        .success()
        .stdout("access-denied: Access denied\n");

    let mut cmd = guarda_cmd_in(&tmp);
    cmd.env("HOME", home.path())
        .args(["guard", &principal, "users", "view"])
        .assert()
        .success()
        .stdout("access-denied: Access denied\n");
}

#[test]
fn invalid_env_bool_is_a_config_error() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.env("GUARDA_DEBUG", "perhaps")
        .arg("catalog")
        .assert()
        .failure()
        .stderr(contains("GUARDA_DEBUG"));
}

// ─── defaults / codec / catalog ────────────────────────────────────

#[test]
fn defaults_for_salesperson() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["defaults", "Vendedor"])
        .assert()
        .success()
        .stdout(contains("leads.create\n").and(contains("users.delete").not()));
}

#[test]
fn defaults_unknown_role_is_empty() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["defaults", "estagiario", "--json"])
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(contains("unknown role"));
}

#[test]
fn flatten_warns_about_lost_levels() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["flatten", "-"])
        .write_stdin(r#"{"leads": {"view": "own", "edit": true}, "tasks": {"view": "team"}}"#)
        .assert()
        .success()
        .stdout("[\"leads.edit\",\"leads.view\"]\n")
        .stderr(contains("round trip"));
}

#[test]
fn unflatten_drops_malformed_entries() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["unflatten", "-"])
        .write_stdin(r#"["leads.view", "garbage"]"#)
        .assert()
        .success()
        .stdout(contains("\"leads\"").and(contains("\"view\": true")))
        .stdout(contains("garbage").not())
        .stderr(contains("garbage"));
}

#[test]
fn unflatten_warns_on_malformed_capability_names() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.args(["unflatten", "-"])
        .write_stdin(r#"["Leads.View", "leads.view"]"#)
        .assert()
        .success()
        .stdout(contains("\"Leads\"").and(contains("\"leads\"")))
        .stderr(contains("Leads.View").and(contains("invalid resource name")));
}

#[test]
fn catalog_lists_every_resource() {
    let (mut cmd, _tmp) = guarda_cmd();
    cmd.arg("catalog")
        .assert()
        .success()
        .stdout(contains("dashboard: view\n"))
        .stdout(contains("proposals: view create edit delete approve\n"))
        .stdout(contains("config: view edit\n"));
}

#[test]
fn debug_flag_logs_to_stderr_only() {
    let (mut cmd, tmp) = guarda_cmd();
    let principal = write_file(&tmp, "p.json", SALESPERSON);
    cmd.args(["-d", "check", &principal, "leads", "delete"])
        .assert()
        .success()
        .stdout("denied\n")
        .stderr(contains("access denied"));
}
