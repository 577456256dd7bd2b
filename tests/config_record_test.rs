use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

/// Run adminlog from inside `dir` with a clean environment.
fn adminlog(dir: &assert_fs::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("adminlog");
    cmd.env_remove("ADMINLOG_DIR")
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// ─── Record ──────────────────────────────────────────────────────

#[test]
fn record_appends_json_line() {
    let dir = assert_fs::TempDir::new().unwrap();

    adminlog(&dir)
        .args([
            "record",
            "--action",
            "menu_created",
            "--user",
            "4",
            "--role",
            "manager",
            "--ip",
            "192.168.0.9",
            "--detail",
            "menu=Dinner",
            "--detail",
            "items=8",
            "--at",
            "2024-03-01 18:00:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded menu_created"));

    let lines = read_lines(&dir.path().join(".adminlog/activity.log"));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["timestamp"], "2024-03-01 18:00:00");
    assert_eq!(lines[0]["user_id"], "4");
    assert_eq!(lines[0]["ip_address"], "192.168.0.9");
    assert_eq!(lines[0]["details"]["menu"], "Dinner");
    assert_eq!(lines[0]["details"]["items"], 8);
    assert_eq!(lines[0]["details"]["actor_role"], "manager");
}

#[test]
fn system_record_has_no_user() {
    let dir = assert_fs::TempDir::new().unwrap();

    adminlog(&dir)
        .args(["record", "--action", "backup_completed", "--role", "system", "--user", "3"])
        .assert()
        .success();

    let lines = read_lines(&dir.path().join(".adminlog/activity.log"));
    assert!(lines[0].get("user_id").is_none());
}

#[test]
fn recorded_events_are_listed() {
    let dir = assert_fs::TempDir::new().unwrap();

    for (action, at) in [
        ("login_success", "2024-01-01 08:00:00"),
        ("complaint_resolved", "2024-01-02 08:00:00"),
    ] {
        adminlog(&dir)
            .args(["record", "--action", action, "--at", at])
            .assert()
            .success();
    }

    adminlog(&dir)
        .args(["list", "--action", "complaint_resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complaint_resolved"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 entries)"));
}

#[test]
fn record_rejects_bad_timestamp() {
    let dir = assert_fs::TempDir::new().unwrap();

    adminlog(&dir)
        .args(["record", "--action", "x", "--at", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));

    assert!(!dir.path().join(".adminlog/activity.log").exists());
}

#[test]
fn record_rejects_bad_detail() {
    let dir = assert_fs::TempDir::new().unwrap();

    adminlog(&dir)
        .args(["record", "--action", "x", "--detail", "no-equals-sign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn record_rejects_unknown_role() {
    let dir = assert_fs::TempDir::new().unwrap();

    adminlog(&dir)
        .args(["record", "--action", "x", "--role", "chef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
}

// ─── Data directory & config ─────────────────────────────────────

#[test]
fn dir_flag_overrides_default_location() {
    let dir = assert_fs::TempDir::new().unwrap();
    let custom = dir.child("elsewhere");

    adminlog(&dir)
        .arg("--dir")
        .arg(custom.path())
        .args(["record", "--action", "x", "--at", "2024-01-01 00:00:00"])
        .assert()
        .success();

    custom.child("activity.log").assert(predicate::path::exists());
    assert!(!dir.path().join(".adminlog").exists());
}

#[test]
fn config_sets_log_file_and_page_size() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".adminlog/config.toml")
        .write_str("[store]\nlog_file = \"kitchen.log\"\n\n[query]\npage_size = 2\n")
        .unwrap();

    for day in 1..=5 {
        adminlog(&dir)
            .args(["record", "--action", "stock_counted"])
            .arg("--at")
            .arg(format!("2024-02-0{day} 07:30:00"))
            .assert()
            .success();
    }

    dir.child(".adminlog/kitchen.log").assert(predicate::path::exists());

    adminlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 3 (5 entries)"));
}

#[test]
fn config_rejects_path_in_log_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".adminlog/config.toml")
        .write_str("[store]\nlog_file = \"../outside.log\"\n")
        .unwrap();

    adminlog(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn broken_config_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".adminlog/config.toml").write_str("[store\n").unwrap();

    adminlog(&dir)
        .arg("actions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config.toml"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".adminlog/activity.log")
        .write_str("not json\n{\"timestamp\":\"2024-01-01 00:00:00\",\"action\":\"a\"}\n")
        .unwrap();

    adminlog(&dir)
        .args(["--verbose", "list", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping malformed log line"))
        .stdout(predicate::str::contains("skipping").not());
}
