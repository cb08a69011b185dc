//! End-to-end checks on the `vikunja` binary that need no API.

use assert_cmd::Command;
use predicates::prelude::*;

fn vikunja() -> Command {
    let mut cmd = Command::cargo_bin("vikunja").expect("vikunja binary");
    // Hermetic: no ambient credentials, no .env pickup from the repo.
    cmd.env_remove("VIKUNJA_URL");
    cmd.env_remove("VIKUNJA_TOKEN");
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn help_works_without_environment() {
    vikunja()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("label"));
}

#[test]
fn missing_url_reports_json_error() {
    vikunja()
        .args(["task", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            r#"{"error":"VIKUNJA_URL environment variable is required"}"#,
        ));
}

#[test]
fn missing_token_reports_json_error() {
    vikunja()
        .env("VIKUNJA_URL", "https://vikunja.example.com/api/v1")
        .args(["label", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            r#"{"error":"VIKUNJA_TOKEN environment variable is required"}"#,
        ));
}

#[test]
fn label_rejects_add_and_remove_together() {
    vikunja()
        .env("VIKUNJA_URL", "https://vikunja.example.com/api/v1")
        .env("VIKUNJA_TOKEN", "token")
        .args(["task", "label", "1", "--add", "2", "--remove", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--add"));
}
