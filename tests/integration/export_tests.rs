use badgelog::store::{StorePaths, Tracker};
use std::fs;
use tempfile::tempdir;

fn tracker_with_scans(dir: &std::path::Path) -> Tracker {
    let mut tracker = Tracker::open(StorePaths::in_dir(dir));
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    tracker.add_user("def456", "Grace \"Amazing\" Hopper", "faculty").unwrap();
    tracker.scan("abc123").unwrap();
    tracker.scan("def456").unwrap();
    tracker.scan("abc123").unwrap();
    tracker
}

#[test]
fn test_json_snapshot_structure() {
    let dir = tempdir().unwrap();
    let tracker = tracker_with_scans(dir.path());

    let path = tracker.export_snapshot().unwrap();
    assert_eq!(path, dir.path().join("attendance.json"));

    let content = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], "abc123");
    assert_eq!(users[0]["status"], "OUT");
    assert_eq!(users[1]["status"], "IN");
    assert_eq!(users[1]["name"], "Grace \"Amazing\" Hopper");

    let logs = json["daily_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0]["action"], "IN");
    assert_eq!(logs[2]["user_id"], "abc123");
    assert_eq!(logs[2]["action"], "OUT");

    assert_eq!(json["summary"]["total_users"], 2);
    assert_eq!(json["summary"]["total_scans"], 3);
    assert_eq!(
        json["summary"]["export_time"].as_str().unwrap().len(),
        "YYYY-MM-DD HH:MM:SS".len()
    );
}

#[test]
fn test_json_escapes_quotes() {
    let dir = tempdir().unwrap();
    let tracker = tracker_with_scans(dir.path());
    let path = tracker.export_snapshot().unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains(r#"Grace \"Amazing\" Hopper"#));
}

#[test]
fn test_json_export_to_custom_path() {
    let dir = tempdir().unwrap();
    let tracker = tracker_with_scans(dir.path());
    let target = dir.path().join("snapshot.json");

    tracker.export_json_to(&target).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_scans"], 3);
}

#[test]
fn test_csv_export() {
    let dir = tempdir().unwrap();
    let tracker = tracker_with_scans(dir.path());
    let target = dir.path().join("logs.csv");

    tracker.export_csv_to(&target).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "user_id,user_name,action,timestamp,unix_timestamp"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("abc123,Ada Lovelace,IN,"));
    assert!(lines[2].contains("\"Grace \"\"Amazing\"\" Hopper\""));
}

#[test]
fn test_export_empty_store() {
    let dir = tempdir().unwrap();
    let tracker = Tracker::open(StorePaths::in_dir(dir.path()));

    let path = tracker.export_snapshot().unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    assert!(json["users"].as_array().unwrap().is_empty());
    assert!(json["daily_logs"].as_array().unwrap().is_empty());
    assert_eq!(json["summary"]["total_users"], 0);
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let tracker = Tracker::open(StorePaths::in_dir(dir.path()));

    let result = tracker.export_json_to(&dir.path().join("missing").join("out.json"));
    assert!(result.is_err());
}
