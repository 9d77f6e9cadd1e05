use assert_cmd::Command;
use predicates::prelude::*;

fn consult() -> Command {
    let mut cmd = Command::cargo_bin("consult_cli").expect("binary");
    cmd.env_remove("CONSULT_SERVER").env_remove("CONSULT_AUTHOR");
    cmd
}

#[test]
fn version_prints_package_version() {
    consult()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn send_without_author_fails() {
    consult()
        .args(["send", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("author"));
}

#[test]
fn in_response_to_requires_agent_flag() {
    consult()
        .args(["send", "hello", "--in-response-to", "hi"])
        .assert()
        .failure();
}

#[test]
fn unreachable_server_is_an_error() {
    consult()
        .args(["--server", "http://127.0.0.1:9", "history"])
        .assert()
        .failure();
}

#[test]
fn invalid_server_url_is_an_error() {
    consult()
        .args(["--server", "not a url", "history"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Url"));
}
