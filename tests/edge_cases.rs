mod helpers;

use gitkit::Error;
use gitkit::files::*;
use helpers::temp_dir;
use std::path::PathBuf;

/// A temp directory reports as a directory, a missing path as nothing
#[test]
fn test_exists_on_temp_dir() {
    let dir = new_temp_dir().unwrap();
    assert_eq!(exists(&dir), Some(PathKind::Dir));
    assert_eq!(exists(dir.join("missing")), None);
    remove_path(&dir).unwrap();
}

#[test]
fn test_sync_write_read_round_trip() {
    let file = new_temp_file().unwrap();
    write_file_sync(&file, "test").unwrap();
    assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some("test"));
    remove_path(&file).unwrap();
}

#[tokio::test]
async fn test_async_write_read_round_trip() {
    let file = new_temp_file().unwrap();
    write_file(&file, "test").await.unwrap();
    assert_eq!(read_file(&file).await.unwrap().as_deref(), Some("test"));
    assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some("test"));
    remove_path(&file).unwrap();
}

#[test]
fn test_replace_in_file() {
    let file = new_temp_file().unwrap();
    write_file_sync(&file, "key1, key2, key3").unwrap();

    replace_in_file_sync(&file, [("key1", "newKey1"), ("key3", "newKey3")]).unwrap();

    assert_eq!(
        read_file_sync(&file).unwrap().as_deref(),
        Some("newKey1, key2, newKey3")
    );
    remove_path(&file).unwrap();
}

/// A later key may match text inserted by an earlier replacement
#[test]
fn test_replace_sees_earlier_substitutions() {
    let (_temp, dir) = temp_dir();
    let file = dir.join("chain.txt");
    write_file_sync(&file, "alpha beta").unwrap();

    let replacements = vec![
        ("alpha".to_string(), "beta".to_string()),
        ("beta".to_string(), "gamma".to_string()),
    ];
    replace_in_file_sync(&file, replacements).unwrap();

    assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some("gamma beta"));
}

#[test]
fn test_replace_with_missing_key_is_noop() {
    let (_temp, dir) = temp_dir();
    let file = dir.join("same.txt");
    write_file_sync(&file, "unchanged").unwrap();

    replace_in_file_sync(&file, [("absent", "x")]).unwrap();
    assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some("unchanged"));
}

#[test]
fn test_find_matches_is_line_anchored() {
    let file = new_temp_file().unwrap();
    write_file_sync(&file, "key1\nkey2 = 'hallo' key2 = ''\nkey3").unwrap();

    let matches = find_matches(&file, "^key2 = '[^']*'").unwrap();

    assert_eq!(matches, vec!["key2 = 'hallo'"]);
    remove_path(&file).unwrap();
}

#[test]
fn test_find_matches_missing_file() {
    let (_temp, dir) = temp_dir();
    let result = find_matches(dir.join("absent.txt"), ".*");
    assert!(matches!(result, Err(Error::MissingFile(_))));
}

#[test]
fn test_join_path_normalizes_boundaries() {
    let expected = PathBuf::from("a/b/c");
    assert_eq!(join_paths(["a/", "/b", "c"]), expected);
    assert_eq!(join_paths(["a", "b/", "/c"]), expected);
}

#[test]
fn test_ensure_dir_creates_and_empties() {
    let (_temp, dir) = temp_dir();
    let target = dir.join("fresh/nested");

    ensure_dir(&target, true).unwrap();
    assert_eq!(exists(&target), Some(PathKind::Dir));

    touch_file_sync(target.join("leftover")).unwrap();
    ensure_dir(&target, true).unwrap();
    assert_eq!(exists(target.join("leftover")), None);
}

#[test]
fn test_assert_file_exists_on_directory() {
    let (_temp, dir) = temp_dir();
    let err = assert_file_exists(&dir).unwrap_err();
    assert!(err.to_string().starts_with("File does not exist"));

    touch_file_sync(dir.join("real")).unwrap();
    assert!(assert_file_exists(dir.join("real")).is_ok());
}
