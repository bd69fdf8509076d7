use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary pointed at an empty config so the user's real session is never touched
fn fittrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.env("FITTRACK_CONFIG", dir.path().join("config.toml"))
        .env_remove("FITTRACK_TOKEN")
        .env_remove("FITTRACK_PASSWORD");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Terminal client"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("goals"))
        .stdout(predicate::str::contains("schedule"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_fittrack"));
}

#[test]
fn test_whoami_when_logged_out() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_goals_list_requires_login() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .args(["goals", "list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("fittrack login"));
}

#[test]
fn test_goal_plan_prints_daily_deficit() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .args([
            "goals",
            "plan",
            "--type",
            "lose_weight",
            "--current-weight",
            "80",
            "--target",
            "5",
            "--months",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("91 days"))
        .stdout(predicate::str::contains("423 kcal/day"));
}

#[test]
fn test_goal_plan_rejects_unsafe_loss() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .args([
            "goals",
            "plan",
            "--type",
            "lose_weight",
            "--current-weight",
            "100",
            "--target",
            "30",
            "--months",
            "6",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unsafe"));
}

#[test]
fn test_config_init_writes_file() {
    let dir = TempDir::new().unwrap();

    fittrack(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    assert!(dir.path().join("config.toml").exists());
}
