//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with `PARABOARD_HOME` pointed at a
//! fresh temp directory so the user's config is never touched.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_paraboard-cli"))
        .env("PARABOARD_HOME", home.path())
        .env_remove("PARABOARD_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn home() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn test_now_during_first_pair() {
    let home = home();
    let (code, out, err) = run_cli(&home, &["now", "--at", "2024-09-02T08:30"]);
    assert_eq!(code, 0, "now failed: {err}");
    assert!(out.starts_with("08:30  понедельник, 2 сентября  ·  1 НЕДЕЛЯ"));
    assert!(out.contains("▶ 1 пара  08:00–09:30  пр.ПИТПМ"));
    assert!(out.contains("→ СЛЕДУЮЩАЯ  09:40–11:10"));
}

#[test]
fn test_now_json() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["now", "--at", "2024-09-02T08:30", "--json"]);
    assert_eq!(code, 0);
    let view: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(view["week"]["selected"], "odd");
    assert_eq!(view["today"]["state"], "lessons");
    assert_eq!(view["next"]["state"], "upcoming");
    assert_eq!(view["ui"]["panel_open"], false);
}

#[test]
fn test_now_with_week_override() {
    let home = home();
    let (code, out, _) = run_cli(
        &home,
        &["now", "--at", "2024-09-02T12:00", "--week", "even"],
    );
    assert_eq!(code, 0);
    assert!(out.contains("2 НЕДЕЛЯ"));
    assert!(out.contains("л.Разработка программных модулей"));
}

#[test]
fn test_next_on_sunday_is_rest() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["next", "--at", "2024-09-08T12:00"]);
    assert_eq!(code, 0);
    assert!(out.contains("ОТДЫХ"));
    assert!(out.contains("Сегодня нет пар"));
}

#[test]
fn test_next_after_last_pair() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["next", "--at", "2024-09-02T18:00", "--json"]);
    assert_eq!(code, 0);
    let card: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(card["state"], "finished");
}

#[test]
fn test_full_schedule_for_day() {
    let home = home();
    let (code, out, _) = run_cli(
        &home,
        &["full", "--at", "2024-09-02T08:30", "--week", "even", "--day", "3"],
    );
    assert_eq!(code, 0);
    assert!(out.starts_with("Среда (2 неделя)"));
    assert!(out.contains("пр.ПОПД"));
}

#[test]
fn test_full_rejects_bad_day() {
    let home = home();
    let (code, _, _) = run_cli(&home, &["full", "--day", "9"]);
    assert_ne!(code, 0);
}

#[test]
fn test_html_page() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["html", "--at", "2024-09-02T08:30"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("пр.ПИТПМ"));
    // The offline copy lands under the data dir.
    assert!(home.path().join("cache").join("index.html").exists());
}

#[test]
fn test_config_get_default() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["config", "get", "refresh.schedule_secs"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "30");
}

#[test]
fn test_config_set_persists() {
    let home = home();
    let (code, _, _) = run_cli(&home, &["config", "set", "animation.fps", "60"]);
    assert_eq!(code, 0);
    let (_, out, _) = run_cli(&home, &["config", "get", "animation.fps"]);
    assert_eq!(out.trim(), "60");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let home = home();
    let (code, _, err) = run_cli(&home, &["config", "set", "nope.key", "1"]);
    assert_eq!(code, 1);
    assert!(err.starts_with("error:"));
}

#[test]
fn test_timetable_validate_reports_overlap() {
    let home = home();
    let (code, out, _) = run_cli(&home, &["timetable", "validate"]);
    assert_eq!(code, 0);
    assert!(out.contains("32 lessons"));
    assert!(out.contains("pair 4 overlaps pair 2"));
}

#[test]
fn test_timetable_export_round_trips_through_config() {
    let home = home();
    let file = home.path().join("timetable.toml");
    let file_str = file.to_str().unwrap();
    let (code, _, _) = run_cli(&home, &["timetable", "export", "--out", file_str]);
    assert_eq!(code, 0);

    let (code, _, _) = run_cli(&home, &["config", "set", "timetable_path", file_str]);
    assert_eq!(code, 0);
    let (code, out, _) = run_cli(&home, &["timetable", "validate"]);
    assert_eq!(code, 0);
    assert!(out.contains("32 lessons"));
}

#[test]
fn test_animate_is_reproducible() {
    let home = home();
    let args = ["animate", "--frames", "10", "--seed", "7", "--json"];
    let (code, first, _) = run_cli(&home, &args);
    assert_eq!(code, 0);
    let (_, second, _) = run_cli(&home, &args);
    assert_eq!(first, second);
    let frame: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(frame["particles"].as_array().unwrap().len(), 30);
}

#[test]
fn test_bad_time_exits_nonzero() {
    let home = home();
    let (code, _, err) = run_cli(&home, &["now", "--at", "yesterday"]);
    assert_eq!(code, 1);
    assert!(err.contains("error:"));
}
