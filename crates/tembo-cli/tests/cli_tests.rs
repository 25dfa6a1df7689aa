use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary config and session paths; nothing listens on the API port.
struct TestEnvironment {
    dir: TempDir,
}

impl TestEnvironment {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write_session(&self) {
        fs::write(
            self.session_path(),
            r#"{
                "staff": {
                    "id": "7",
                    "email": "amani@tembo.co.ke",
                    "name": "Amani Mwangi",
                    "role": "manager"
                },
                "tokens": { "access_token": "acc-1", "refresh_token": "ref-1" }
            }"#,
        )
        .expect("Failed to write session file");
    }

    /// A `tembo` command with --no-color and this environment's paths.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tembo").expect("Failed to find tembo binary");
        cmd.env_remove("TEMBO_API_URL")
            .arg("--no-color")
            .arg("--config")
            .arg(self.config_path())
            .arg("--session-file")
            .arg(self.session_path())
            .args(["--api-url", "http://127.0.0.1:9"]);
        cmd
    }
}

#[test]
fn test_cli_help_lists_commands() {
    let env = TestEnvironment::new();

    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("itinerary"))
        .stdout(predicate::str::contains("staff"));
}

#[test]
fn test_cli_whoami_signed_out() {
    let env = TestEnvironment::new();

    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_cli_whoami_restores_saved_session() {
    let env = TestEnvironment::new();
    env.write_session();

    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amani Mwangi <amani@tembo.co.ke>"));
}

#[test]
fn test_cli_protected_command_requires_sign_in() {
    let env = TestEnvironment::new();

    env.cmd()
        .args(["itinerary", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let env = TestEnvironment::new();
    env.write_session();

    env.cmd()
        .args(["itinerary", "delete", "it-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));
}

#[test]
fn test_cli_login_validates_before_sending() {
    let env = TestEnvironment::new();

    env.cmd()
        .args(["auth", "login", "not-an-email", "--password", "short"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fix the highlighted fields"))
        .stderr(predicate::str::contains("email: Must be a valid email"))
        .stderr(predicate::str::contains("password:"));

    assert!(!env.session_path().exists());
}

#[test]
fn test_cli_logout_removes_session_file() {
    let env = TestEnvironment::new();
    env.write_session();

    env.cmd()
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    assert!(!env.session_path().exists());
}

#[test]
fn test_cli_rejects_malformed_staff_member() {
    let env = TestEnvironment::new();

    env.cmd()
        .args(["staff", "create", "--member", "Neema Otieno"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("First,Last,email"));
}

#[test]
fn test_cli_invalid_config_file() {
    let env = TestEnvironment::new();
    fs::write(env.config_path(), "[api\nbase_url = ").expect("Failed to write config");

    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize dashboard"));
}

#[test]
fn test_cli_delete_failure_is_explained() {
    let env = TestEnvironment::new();
    env.write_session();

    env.cmd()
        .args(["blog", "delete", "blog-1", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Network error. Please check your connection.",
        ));

    assert!(env.session_path().exists());
}
