//! CLI surface of the server binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_backend_options() {
    Command::cargo_bin("scoop_server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--redis-url"));
}

#[test]
fn version_matches_package() {
    Command::cargo_bin("scoop_server")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_unknown_flags() {
    Command::cargo_bin("scoop_server")
        .unwrap()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}
