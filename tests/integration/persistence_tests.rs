use badgelog::store::codec::{self, encode_parts};
use badgelog::store::{CodecError, ScanLog, Status, StorePaths, Tracker, User, STORE_VERSION};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_mutations_survive_restart() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());

    {
        let mut tracker = Tracker::open(paths.clone());
        tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
        tracker.add_user("def456", "Grace Hopper", "faculty").unwrap();
        tracker.scan("abc123").unwrap();
        tracker.scan("def456").unwrap();
        tracker.scan("def456").unwrap();
    }

    let tracker = Tracker::open(paths);
    assert_eq!(tracker.total_users(), 2);
    assert_eq!(tracker.total_scans(), 3);
    assert_eq!(tracker.store().status_of("abc123"), Status::In);
    assert_eq!(tracker.store().status_of("def456"), Status::Out);
    assert_eq!(tracker.find_user("def456").unwrap().role, "faculty");
}

#[test]
fn test_store_file_layout() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    let mut tracker = Tracker::open(paths.clone());
    tracker.add_user("abc", "Al", "staff").unwrap();

    let bytes = fs::read(&paths.store_file).unwrap();

    assert_eq!(&bytes[..4], &STORE_VERSION.to_le_bytes());
    assert_eq!(&bytes[4..12], &1u64.to_le_bytes());
    assert_eq!(&bytes[12..20], &3u64.to_le_bytes());
    assert_eq!(&bytes[20..23], b"abc");
}

#[test]
fn test_missing_status_defaults_to_out() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    fs::create_dir_all(&paths.data_dir).unwrap();

    let users = vec![
        (User::new("abc123", "Ada Lovelace", "student"), None),
        (User::new("def456", "Grace Hopper", "staff"), Some(Status::In)),
    ];
    fs::write(&paths.store_file, encode_parts(&users, &[])).unwrap();

    let tracker = Tracker::open(paths);
    assert_eq!(tracker.store().status_of("abc123"), Status::Out);
    assert_eq!(tracker.store().status_of("def456"), Status::In);
}

#[test]
fn test_wrong_version_starts_empty() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    fs::create_dir_all(&paths.data_dir).unwrap();

    let mut bytes = encode_parts(&[(User::new("abc123", "Ada", "student"), None)], &[]);
    bytes[..4].copy_from_slice(&2u32.to_le_bytes());
    fs::write(&paths.store_file, &bytes).unwrap();

    let err = codec::load(&paths.store_file).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnsupportedVersion {
            found: 2,
            expected: 1
        }
    ));

    let tracker = Tracker::open(paths);
    assert_eq!(tracker.total_users(), 0);
}

#[test]
fn test_corrupted_store_starts_empty() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());

    {
        let mut tracker = Tracker::open(paths.clone());
        tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();
        tracker.scan("abc123").unwrap();
    }

    let mut bytes = fs::read(&paths.store_file).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&paths.store_file, &bytes).unwrap();

    assert!(codec::load(&paths.store_file).is_err());
    let tracker = Tracker::open(paths);
    assert_eq!(tracker.total_users(), 0);
    assert_eq!(tracker.total_scans(), 0);
}

#[test]
fn test_truncated_store_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("attendance.bin");
    let bytes = encode_parts(
        &[(User::new("abc123", "Ada", "student"), Some(Status::In))],
        &[ScanLog::at("abc123", "Ada", Status::In, 1_700_000_000)],
    );
    fs::write(&path, &bytes[..bytes.len() - 40]).unwrap();

    assert!(codec::load(&path).is_err());
}

#[test]
fn test_explicit_save() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    let mut tracker = Tracker::open(paths.clone());
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();

    fs::remove_file(&paths.store_file).unwrap();
    tracker.save().unwrap();

    assert!(paths.store_file.exists());
    assert!(!tracker.is_dirty());
}

#[test]
fn test_unwritable_store_marks_dirty() {
    let dir = tempdir().unwrap();
    let mut paths = StorePaths::in_dir(dir.path());
    // A directory in place of the store file makes every save fail.
    fs::create_dir_all(&paths.data_dir).unwrap();
    paths.store_file = dir.path().join("blocked");
    fs::create_dir_all(&paths.store_file).unwrap();

    let mut tracker = Tracker::open(paths);
    tracker.add_user("abc123", "Ada Lovelace", "student").unwrap();

    assert!(tracker.is_dirty());
    assert_eq!(tracker.total_users(), 1);
}
