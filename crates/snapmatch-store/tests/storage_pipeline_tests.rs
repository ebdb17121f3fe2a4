#![allow(clippy::unwrap_used, clippy::expect_used)]

use snapmatch_core::errors::SnapError;
use snapmatch_core::pipeline::{ComparatorStage, Pipeline, SerializerStage};
use snapmatch_core::settings::{Settings, SettingsBuilder};
use snapmatch_core::value::SnapshotValue;
use snapmatch_core::{Advisories, SnapshotContext};
use snapmatch_store::{ReaderStage, WriterStage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn storage_pipeline() -> Pipeline {
    Pipeline::new()
        .use_stage(ReaderStage)
        .use_stage(SerializerStage)
        .use_stage(ComparatorStage)
        .use_stage(WriterStage)
}

fn run(settings: &Settings, json: &str) -> bool {
    let advisories = Advisories::new();
    let mut ctx = SnapshotContext::new(settings, SnapshotValue::parse(json).unwrap())
        .with_advisories(&advisories);
    storage_pipeline().process(&mut ctx).unwrap()
}

fn settings(dir: &Path) -> SettingsBuilder {
    SettingsBuilder::new()
        .snapshot_name("Orders")
        .snapshot_directory(dir)
}

#[test]
fn test_refresh_then_match_performs_no_write() {
    let dir = TempDir::new().unwrap();
    let refresh = settings(dir.path()).force_refresh(true).build().unwrap();
    let plain = settings(dir.path()).build().unwrap();

    assert!(run(&refresh, r#"{"id": 1, "items": [1, 2]}"#));
    let written = fs::read_to_string(refresh.snapshot_file_path()).unwrap();
    assert!(written.ends_with("}\n"));

    assert!(run(&plain, r#"{"items": [1, 2], "id": 1}"#));
    assert_eq!(fs::read_to_string(plain.snapshot_file_path()).unwrap(), written);
    assert!(!plain.mismatch_file_path().exists());
}

#[test]
fn test_mismatch_file_replaced_then_cleared() {
    let dir = TempDir::new().unwrap();
    let plain = settings(dir.path()).indent_output(false).build().unwrap();

    assert!(!run(&plain, r#"{"z": 1}"#));
    assert!(!plain.snapshot_file_path().exists());
    assert_eq!(
        fs::read_to_string(plain.mismatch_file_path()).unwrap(),
        "{\"z\":1}\n"
    );

    assert!(!run(&plain, r#"{"z": 2}"#));
    assert_eq!(
        fs::read_to_string(plain.mismatch_file_path()).unwrap(),
        "{\"z\":2}\n"
    );

    let create = settings(dir.path())
        .indent_output(false)
        .create_missing(true)
        .build()
        .unwrap();
    assert!(run(&create, r#"{"z": 2}"#));
    assert!(!create.mismatch_file_path().exists());
    assert!(run(&plain, r#"{"z": 2}"#));
}

#[test]
fn test_group_refresh_preserves_siblings_in_order() {
    let dir = TempDir::new().unwrap();
    let group = |key: &str| {
        settings(dir.path())
            .group_key(key)
            .force_refresh(true)
            .indent_output(false)
            .build()
            .unwrap()
    };

    assert!(run(&group("Charlie"), "3"));
    assert!(run(&group("Alpha"), "1"));
    assert!(run(&group("Charlie"), "33"));

    let content = fs::read_to_string(group("Alpha").snapshot_file_path()).unwrap();
    assert_eq!(content, "{\"Charlie\":33,\"Alpha\":1}\n");
}

#[test]
fn test_group_mismatch_is_single_entry() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Orders.txt"),
        r#"{"Alpha": 1, "Bravo": 2}"#,
    )
    .unwrap();
    let bravo = settings(dir.path())
        .group_key("Bravo")
        .indent_output(false)
        .build()
        .unwrap();

    assert!(!run(&bravo, "5"));

    assert_eq!(
        fs::read_to_string(bravo.mismatch_file_path()).unwrap(),
        "{\"Bravo\":5}\n"
    );
    assert_eq!(
        fs::read_to_string(bravo.snapshot_file_path()).unwrap(),
        r#"{"Alpha": 1, "Bravo": 2}"#
    );
}

#[test]
fn test_create_missing_adds_group_member() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Orders.txt"), r#"{"Alpha": 1}"#).unwrap();
    let bravo = settings(dir.path())
        .group_key("Bravo")
        .create_missing(true)
        .indent_output(false)
        .build()
        .unwrap();

    assert!(run(&bravo, "2"));
    assert_eq!(
        fs::read_to_string(bravo.snapshot_file_path()).unwrap(),
        "{\"Alpha\":1,\"Bravo\":2}\n"
    );
}

#[test]
fn test_scalar_string_written_raw() {
    let dir = TempDir::new().unwrap();
    let refresh = settings(dir.path()).force_refresh(true).build().unwrap();

    assert!(run(&refresh, "\"hello\""));
    assert_eq!(
        fs::read_to_string(refresh.snapshot_file_path()).unwrap(),
        "hello\n"
    );

    let plain = settings(dir.path()).build().unwrap();
    assert!(run(&plain, "\"hello\""));
    assert!(!run(&plain, "\"Hello\""));
}

#[test]
fn test_writer_without_serializer_fails_loudly() {
    let dir = TempDir::new().unwrap();
    let refresh = settings(dir.path()).force_refresh(true).build().unwrap();
    let mut ctx = SnapshotContext::new(&refresh, SnapshotValue::from(1i64));

    let err = Pipeline::new()
        .use_stage(ReaderStage)
        .use_stage(WriterStage)
        .process(&mut ctx)
        .unwrap_err();

    assert!(matches!(err, SnapError::UnsupportedPayload { .. }));
    assert!(!refresh.snapshot_file_path().exists());
}
