//! End-to-end checks on the `habitwire` binary that need no API.

use assert_cmd::Command;
use predicates::prelude::*;

fn habitwire() -> Command {
    let mut cmd = Command::cargo_bin("habitwire").expect("habitwire binary");
    // Hermetic: no ambient credentials, no .env pickup from the repo.
    cmd.env_remove("HABITWIRE_URL");
    cmd.env_remove("HABITWIRE_TOKEN");
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn help_works_without_environment() {
    habitwire()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("key"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn missing_url_reports_json_error() {
    habitwire()
        .args(["key", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            r#"{"error":"HABITWIRE_URL environment variable is required"}"#,
        ));
}

#[test]
fn missing_token_reports_json_error() {
    habitwire()
        .env("HABITWIRE_URL", "https://habitwire.example.com/api")
        .arg("health")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            r#"{"error":"HABITWIRE_TOKEN environment variable is required"}"#,
        ));
}

#[test]
fn export_rejects_unknown_formats() {
    habitwire()
        .args(["export", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
