//! Integration tests for the `japi` subcommands over document files.

use std::path::PathBuf;

use japi_cli::status::{run_status, StatusArgs};
use japi_cli::validate::{run_validate, ValidateArgs};
use japi_schema::DocumentKind;

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn validate_passes_well_formed_documents() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write(&dir, "users.json", r#"{"data":[{"type":"users","id":"1"}]}"#),
        write(&dir, "user.json", r#"{"data":{"type":"users","id":"1"}}"#),
        write(&dir, "missing.json", r#"{"errors":[{"status":"404","code":"JA001"}]}"#),
        write(&dir, "count.json", r#"{"meta":{"count":3}}"#),
    ];
    let args = ValidateArgs { files, expect: None };
    assert_eq!(run_validate(&args).unwrap(), 0);
}

#[test]
fn validate_fails_on_unknown_members() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![write(
        &dir,
        "bad.json",
        r#"{"data":{"type":"users","id":"1","extra":true}}"#,
    )];
    let args = ValidateArgs { files, expect: None };
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn validate_checks_expected_kind() {
    let dir = tempfile::tempdir().unwrap();
    let single = write(&dir, "user.json", r#"{"data":{"type":"users","id":"1"}}"#);

    let args = ValidateArgs {
        files: vec![single.clone()],
        expect: Some(DocumentKind::Resource),
    };
    assert_eq!(run_validate(&args).unwrap(), 0);

    let args = ValidateArgs {
        files: vec![single],
        expect: Some(DocumentKind::Collection),
    };
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn validate_counts_unreadable_files_as_failures() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write(&dir, "broken.json", "{"),
        dir.path().join("absent.json"),
    ];
    let args = ValidateArgs { files, expect: None };
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn status_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let conflict = write(
        &dir,
        "conflict.json",
        r#"{"errors":[{"status":"404"},{"status":"409"}]}"#,
    );
    assert_eq!(run_status(&StatusArgs { file: conflict }).unwrap(), 0);

    let garbage = write(&dir, "garbage.json", "<html>");
    assert_eq!(run_status(&StatusArgs { file: garbage }).unwrap(), 1);

    let absent = dir.path().join("absent.json");
    assert!(run_status(&StatusArgs { file: absent }).is_err());
}
