//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn custapi() -> Command {
    let mut cmd = Command::cargo_bin("custapi").unwrap();
    // Keep the developer's environment out of the tests
    for var in [
        "DATABASE_URL",
        "CUSTAPI_CONFIG",
        "CUSTAPI_BIND",
        "CUSTAPI_DB_HOST",
        "CUSTAPI_DB_PORT",
        "CUSTAPI_DB_USER",
        "CUSTAPI_DB_PASSWORD",
        "CUSTAPI_DB_NAME",
        "CUSTAPI_POOL_SIZE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_top_level_help() {
    custapi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check-db"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    custapi()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--pool-size"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_check_db_help() {
    custapi()
        .arg("check-db")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--acquire-timeout"));
}

#[test]
fn test_pool_size_zero_rejected() {
    custapi()
        .args(["serve", "--pool-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pool-size"));
}

#[test]
fn test_config_show_masks_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[database]\nhost = \"db.example\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    custapi()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db.example"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_path_reports_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "").unwrap();

    custapi()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"))
        .stdout(predicate::str::contains("not found").not());
}

#[test]
fn test_missing_explicit_config_fails() {
    custapi()
        .args(["--config", "/nonexistent/custapi.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_check_db_unreachable_fails() {
    custapi()
        .args([
            "check-db",
            "--db-host",
            "127.0.0.1",
            "--db-port",
            "1",
            "--acquire-timeout",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("127.0.0.1:1/SAMPLE"));
}
