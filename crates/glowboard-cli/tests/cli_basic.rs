//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and a
//! schedule file written to a temp dir.

use std::path::Path;
use std::process::Command;

const SCHEDULE: &str = r#"{
    "name": "Grace",
    "days": [
        { "day": "Monday", "tasks": [
            { "task": "Inbox", "from": "09:00", "to": "09:30", "rgb": "0,255,200" },
            { "task": "Design review", "from": "10:00", "to": "10:30", "rgb": "255,0,200",
              "details": "https://example.com/review" }
        ] },
        { "day": "Tuesday", "tasks": [] }
    ]
}"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_glowboard"))
        .env("GLOWBOARD_CONFIG_DIR", config_dir)
        .env_remove("GLOWBOARD_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn setup() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("week.json");
    std::fs::write(&path, SCHEDULE).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn test_validate_ok() {
    let (dir, path) = setup();
    let (stdout, _, code) = run_cli(dir.path(), &["validate", &path]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok: Grace (2 days, 2 tasks)"));
}

#[test]
fn test_validate_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"name":"x","days":[{"day":"Monday","tasks":[
            {"task":"t","from":"25:00","to":"26:00","rgb":"1,1,1"}]}]}"#,
    )
    .unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["validate", path.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid time"));
}

#[test]
fn test_show_json_snapshot() {
    let (dir, path) = setup();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["show", "--schedule", &path, "--day", "Monday", "--at", "09:15", "--json"],
    );
    assert_eq!(code, 0);

    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["greeting"], "Welcome, Grace!");
    assert_eq!(snap["day"], "Monday");
    assert_eq!(snap["tasks"][0]["state"], "active");
    assert_eq!(snap["tasks"][0]["progress_percent"], 50);
    assert_eq!(snap["tasks"][1]["state"], "future");
    assert_eq!(snap["next_up"]["label"], "Design review");
}

#[test]
fn test_show_missing_day_is_empty() {
    let (dir, path) = setup();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["show", "--schedule", &path, "--day", "Sunday", "--at", "09:15"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Sunday: no tasks scheduled"));
    assert!(stdout.contains("Next: No more tasks"));
}

#[test]
fn test_next_text() {
    let (dir, path) = setup();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["next", "--schedule", &path, "--day", "Monday", "--at", "09:45"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Design review (10:00)");

    let (stdout, _, _) = run_cli(
        dir.path(),
        &["next", "--schedule", &path, "--day", "Monday", "--at", "10:00"],
    );
    assert_eq!(stdout.trim(), "No more tasks");
}

#[test]
fn test_rejects_bad_at_argument() {
    let (dir, path) = setup();
    let (_, _, code) = run_cli(dir.path(), &["next", "--schedule", &path, "--at", "9am"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "set", "engine.drag_threshold_px", "120"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "engine.drag_threshold_px"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim().parse::<f64>().unwrap(), 120.0);

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "engine.tick_interval_ms", "5"]);
    assert_ne!(code, 0);
}

#[test]
fn test_watch_quits_on_eof() {
    let (dir, path) = setup();
    let output = Command::new(env!("CARGO_BIN_EXE_glowboard"))
        .env("GLOWBOARD_CONFIG_DIR", dir.path())
        .args(["watch", "--schedule", &path, "--day", "Monday"])
        .stdin(std::process::Stdio::null())
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome, Grace!"));
}

#[test]
fn test_watch_quits_on_q_with_stdin_open() {
    use std::io::Write;
    use std::time::{Duration, Instant};

    let (dir, path) = setup();
    let mut child = Command::new(env!("CARGO_BIN_EXE_glowboard"))
        .env("GLOWBOARD_CONFIG_DIR", dir.path())
        .args(["watch", "--schedule", &path, "--day", "Monday"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .spawn()
        .expect("Failed to execute CLI command");

    // Keep the pipe open after `q` so only the command itself can end it.
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"q\n").unwrap();
    stdin.flush().unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break Some(status);
        }
        if Instant::now() >= deadline {
            break None;
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    if status.is_none() {
        let _ = child.kill();
    }
    drop(stdin);

    assert!(status.expect("watch should exit after q").success());
}

#[test]
fn test_watch_rejects_unscheduled_day() {
    let (dir, path) = setup();
    let output = Command::new(env!("CARGO_BIN_EXE_glowboard"))
        .env("GLOWBOARD_CONFIG_DIR", dir.path())
        .args(["watch", "--schedule", &path, "--day", "Sunday"])
        .stdin(std::process::Stdio::null())
        .output()
        .expect("Failed to execute CLI command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Sunday is not in the schedule"));
}

#[test]
fn test_show_without_day_falls_back_to_first_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monday.json");
    std::fs::write(
        &path,
        r#"{"name":"Grace","days":[{"day":"Monday","tasks":[
            {"task":"Inbox","from":"09:00","to":"09:30","rgb":"0,255,200"}]}]}"#,
    )
    .unwrap();
    let path = path.to_string_lossy().to_string();

    // Only Monday exists, so whatever today is the board lands on Monday.
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["show", "--schedule", &path, "--at", "09:15", "--json"],
    );
    assert_eq!(code, 0);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["day"], "Monday");
    assert_eq!(snap["tasks"][0]["state"], "active");

    let (stdout, _, code) = run_cli(dir.path(), &["next", "--schedule", &path, "--at", "08:00"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Inbox (09:00)");
}
