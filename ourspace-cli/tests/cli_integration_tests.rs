//! Integration tests for the OurSpace CLI surface.
//!
//! Every test here stays offline: they exercise argument parsing, help
//! output, and the failure paths that resolve before any request is sent.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Points the process at a throwaway config root so no real session jar
/// is read or written.
fn isolate_home(cmd: &mut assert_cmd::Command, dir: &tempfile::TempDir) {
    cmd.env("HOME", dir.path());
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd.env_remove("OURSPACE_BASE_URL");
}

#[tokio::test]
async fn test_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("ourspace");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("login"))
        .stdout(predicates::str::contains("register"))
        .stdout(predicates::str::contains("status"))
        .stdout(predicates::str::contains("logout"))
        .stdout(predicates::str::contains("invite"))
        .stdout(predicates::str::contains("link"));
}

#[tokio::test]
async fn test_login_help_shows_flags() {
    let mut cmd = cargo_bin_cmd!("ourspace");
    cmd.arg("login").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--server"))
        .stdout(predicates::str::contains("--config"));
}

#[tokio::test]
async fn test_invite_requires_email() {
    let mut cmd = cargo_bin_cmd!("ourspace");
    cmd.arg("invite").timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains(
            "the following required arguments were not provided",
        ))
        .stderr(predicates::str::contains("--email <EMAIL>"));
}

#[tokio::test]
async fn test_link_requires_code() {
    let mut cmd = cargo_bin_cmd!("ourspace");
    cmd.arg("link").timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains(
            "the following required arguments were not provided",
        ))
        .stderr(predicates::str::contains("--code <CODE>"));
}

#[tokio::test]
async fn test_link_rejects_oversized_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ourspace");
    isolate_home(&mut cmd, &dir);
    cmd.arg("link")
        .arg("--code")
        .arg("WAY-TOO-LONG-CODE")
        .timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid pairing code"));
}

#[tokio::test]
async fn test_status_without_session_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ourspace");
    isolate_home(&mut cmd, &dir);
    cmd.arg("status").timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no active session found"));
}

#[tokio::test]
async fn test_invite_without_session_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ourspace");
    isolate_home(&mut cmd, &dir);
    cmd.arg("invite")
        .arg("--email")
        .arg("sam@example.com")
        .timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no active session found"));
}

#[tokio::test]
async fn test_logout_without_session_reports_nothing_to_remove() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ourspace");
    isolate_home(&mut cmd, &dir);
    cmd.arg("logout").timeout(Duration::from_secs(5));

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("No session cookies found"));
}

#[tokio::test]
async fn test_login_rejects_empty_email() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ourspace");
    isolate_home(&mut cmd, &dir);
    cmd.arg("login")
        .write_stdin("\n")
        .timeout(Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("input must not be empty"));
}
