#![allow(clippy::unwrap_used, clippy::expect_used)]

use snapmatch_core::errors::SnapError;
use snapmatch_core::logging_facility::test_capture::init_test_capture;
use snapmatch_core::{log_op_end, log_op_error, log_op_start};
use snapmatch_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "logging_start_unique_1";

    log_op_start!(op_name, snapshot_name = "Alpha");

    let starts: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.is(op_name, EVENT_START))
        .collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("snapshot_name"), Some("Alpha"));
}

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "logging_end_unique_2";

    log_op_end!(op_name, duration_ms = 17u64, matched = true);

    let ends: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.is(op_name, EVENT_END))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("duration_ms"), Some("17"));
    assert_eq!(ends[0].field("matched"), Some("true"));
}

#[test]
fn test_log_op_error_macro_records_code() {
    let capture = init_test_capture();
    let op_name = "logging_error_unique_3";
    let err = SnapError::RootExclusion {
        path: "$".to_string(),
    };

    log_op_error!(op_name, &err, duration_ms = 1u64);

    let errors: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.is(op_name, EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_SELECTION"));
    assert_eq!(errors[0].level, tracing::Level::ERROR);
}

#[test]
fn test_assert_event_exists() {
    let capture = init_test_capture();
    log_op_start!("logging_assert_unique_4");
    capture.assert_event_exists("logging_assert_unique_4", EVENT_START);
}
