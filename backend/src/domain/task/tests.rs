//! Tests for task validation, patching, and filtering.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;

fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn task() -> Task {
    Task {
        id: TaskId::new("1").expect("valid id"),
        title: TaskTitle::new("Write release notes").expect("valid title"),
        description: Some("for 0.1.0".to_owned()),
        completed: false,
        created_at: timestamp(9),
        updated_at: timestamp(9),
    }
}

#[rstest]
#[case("abc", true)]
#[case("ab", false)]
#[case("", false)]
#[case("  a", true)]
#[case("ação", true)]
fn title_length_is_checked_on_raw_characters(#[case] raw: &str, #[case] ok: bool) {
    assert_eq!(TaskTitle::new(raw).is_ok(), ok, "title {raw:?}");
}

#[rstest]
fn short_title_reports_lengths() {
    let err = TaskTitle::new("ab").expect_err("short title rejected");
    assert_eq!(err, TaskValidationError::TitleTooShort { min: 3, actual: 2 });
    assert_eq!(err.field(), "title");
}

#[rstest]
fn empty_id_is_rejected() {
    assert_eq!(TaskId::new(""), Err(TaskValidationError::EmptyId));
}

#[rstest]
fn validation_errors_convert_to_domain_errors() {
    let err: DomainError = TaskValidationError::TitleTooShort { min: 3, actual: 1 }.into();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(err.field(), Some("title"));
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "min": 3, "actual": 1 }))
    );
}

#[rstest]
fn new_task_validates_title() {
    assert!(NewTask::new("ok", None).is_err());
    let input = NewTask::new("Buy milk", Some("2 litres".to_owned())).expect("valid input");
    assert_eq!(input.title.as_str(), "Buy milk");
    assert_eq!(input.description.as_deref(), Some("2 litres"));
}

#[rstest]
fn patch_updates_only_present_fields(task: Task) {
    let patch = TaskPatch::completion(true);
    let patched = task.clone().patched(&patch, timestamp(10));

    assert!(patched.completed);
    assert_eq!(patched.title, task.title);
    assert_eq!(patched.description, task.description);
    assert_eq!(patched.created_at, task.created_at);
    assert_eq!(patched.updated_at, timestamp(10));
}

#[rstest]
fn patch_can_clear_description(task: Task) {
    let patch = TaskPatch::default().with_description(None);
    let patched = task.patched(&patch, timestamp(11));
    assert!(patched.description.is_none());
}

#[rstest]
fn empty_patch_only_touches_timestamp(task: Task) {
    let patch = TaskPatch::default();
    assert!(patch.is_empty());

    let patched = task.clone().patched(&patch, timestamp(12));
    assert_eq!(patched.title, task.title);
    assert_eq!(patched.updated_at, timestamp(12));
}

#[rstest]
fn patch_rejects_short_titles() {
    assert!(TaskPatch::default().with_title("no").is_err());
}

#[rstest]
#[case(TaskFilter::default(), true)]
#[case(TaskFilter::completed(false), true)]
#[case(TaskFilter::completed(true), false)]
#[case(TaskFilter { completed: None, title_contains: Some("RELEASE".to_owned()) }, true)]
#[case(TaskFilter { completed: None, title_contains: Some("deploy".to_owned()) }, false)]
fn filter_matches_criteria(task: Task, #[case] filter: TaskFilter, #[case] expected: bool) {
    assert_eq!(filter.matches(&task), expected);
}

#[rstest]
fn task_serialises_camel_case(task: Task) {
    let value = serde_json::to_value(&task).expect("task serialises");
    assert_eq!(value["id"], "1");
    assert_eq!(value["completed"], false);
    assert!(value.get("createdAt").is_some());
    assert!(value.get("updatedAt").is_some());
}
