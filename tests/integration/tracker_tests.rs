use badgelog::store::{Status, StoreError, StorePaths, Tracker};
use tempfile::tempdir;

fn open_in(dir: &std::path::Path) -> Tracker {
    Tracker::open(StorePaths::in_dir(dir))
}

#[test]
fn test_register_and_toggle() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());

    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    assert_eq!(tracker.store().status_of("abc123"), Status::Out);

    let first = tracker.scan("abc123").unwrap();
    let second = tracker.scan("abc123").unwrap();

    assert_eq!(first.action, Status::In);
    assert_eq!(second.action, Status::Out);
    assert_eq!(first.user_name, "Ada Lovelace");
    assert_eq!(tracker.total_scans(), 2);
    assert_eq!(tracker.store().status_of("abc123"), Status::Out);
}

#[test]
fn test_duplicate_user_rejected() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());

    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    let err = tracker.add_user("abc123", "Grace Hopper", "staff").unwrap_err();

    assert!(matches!(err, StoreError::DuplicateUser(ref id) if id == "abc123"));
    assert_eq!(tracker.total_users(), 1);
    assert_eq!(tracker.find_user("abc123").unwrap().name, "Ada Lovelace");
}

#[test]
fn test_unknown_scan_changes_nothing() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    tracker.scan("abc123").unwrap();

    let err = tracker.scan("ghost").unwrap_err();

    assert!(matches!(err, StoreError::UnknownUser(_)));
    assert_eq!(tracker.total_scans(), 1);
    assert_eq!(tracker.store().status_of("abc123"), Status::In);
}

#[test]
fn test_search_preserves_order_and_filters() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());
    tracker.add_user("aaa111", "Ada Lovelace", "student").unwrap();
    tracker.add_user("bbb222", "Grace Hopper", "faculty").unwrap();

    tracker.scan("aaa111").unwrap();
    tracker.scan("bbb222").unwrap();
    tracker.scan("aaa111").unwrap();

    let ada = tracker.search_logs("aaa111");
    assert_eq!(ada.len(), 2);
    assert_eq!(ada[0].action, Status::In);
    assert_eq!(ada[1].action, Status::Out);
    assert!(tracker.search_logs("nobody").is_empty());
}

#[test]
fn test_status_and_report_views() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());
    tracker.add_user("aaa111", "Ada Lovelace", "student").unwrap();
    tracker.add_user("bbb222", "Grace Hopper", "faculty").unwrap();
    tracker.scan("bbb222").unwrap();

    let status: Vec<_> = tracker
        .user_status_view()
        .into_iter()
        .map(|(user, status)| (user.id.clone(), status))
        .collect();
    assert_eq!(
        status,
        vec![
            ("aaa111".to_string(), Status::Out),
            ("bbb222".to_string(), Status::In)
        ]
    );

    let report = tracker.daily_report_view();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].scan_count, 0);
    assert_eq!(report[0].last_action_label(), "NONE");
    assert_eq!(report[1].scan_count, 1);
    assert_eq!(report[1].last_action, Some(Status::In));
}

#[test]
fn test_clear_daily_logs_keeps_users() {
    let dir = tempdir().unwrap();
    let mut tracker = open_in(dir.path());
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    tracker.scan("abc123").unwrap();

    tracker.clear_daily_logs();

    assert_eq!(tracker.total_scans(), 0);
    assert_eq!(tracker.total_users(), 1);
    assert_eq!(tracker.store().status_of("abc123"), Status::Out);

    // Toggling restarts from OUT.
    assert_eq!(tracker.scan("abc123").unwrap().action, Status::In);
}

#[test]
fn test_clear_all_data() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    let mut tracker = Tracker::open(paths.clone());
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
    tracker.scan("abc123").unwrap();

    tracker.clear_all_data();
    assert_eq!(tracker.total_users(), 0);
    assert_eq!(tracker.total_scans(), 0);

    let reopened = Tracker::open(paths);
    assert_eq!(reopened.total_users(), 0);
    assert!(reopened.find_user("abc123").is_none());
}

#[test]
fn test_open_creates_data_dir() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested").join("data");

    let tracker = Tracker::open(StorePaths::in_dir(&nested));

    assert!(nested.is_dir());
    assert_eq!(tracker.total_users(), 0);
    assert!(!tracker.is_dirty());
}
