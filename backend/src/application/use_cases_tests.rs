//! Tests for the task use cases.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockTaskRepository;
use crate::domain::{DomainError, ErrorCode, TaskTitle};

#[fixture]
fn task_id() -> TaskId {
    TaskId::new("1").expect("valid id")
}

#[fixture]
fn stored_task(task_id: TaskId) -> Task {
    let at = Utc
        .with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Task {
        id: task_id,
        title: TaskTitle::new("Book the venue").expect("valid title"),
        description: None,
        completed: false,
        created_at: at,
        updated_at: at,
    }
}

#[rstest]
#[tokio::test]
async fn create_passes_input_through_once(stored_task: Task) {
    let input = NewTask::new("Book the venue", None).expect("valid input");
    let expected = stored_task.clone();

    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .with(eq(input.clone()))
        .times(1)
        .return_once(move |_| Ok(stored_task));

    let created = CreateTaskUseCase::new(Arc::new(repo))
        .execute(input)
        .await
        .expect("create succeeds");
    assert_eq!(created, expected);
}

#[rstest]
#[tokio::test]
async fn create_returns_repository_failure_unchanged() {
    let failure = DomainError::validation("Title is required");
    let returned = failure.clone();

    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(move |_| Err(returned));

    let input = NewTask::new("Anything", None).expect("valid input");
    let err = CreateTaskUseCase::new(Arc::new(repo))
        .execute(input)
        .await
        .expect_err("failure propagates");
    assert_eq!(err, failure);
    assert_eq!(err.message(), "Title is required");
}

#[rstest]
#[tokio::test]
async fn get_tasks_forwards_filter(stored_task: Task) {
    let filter = TaskFilter::completed(false);

    let mut repo = MockTaskRepository::new();
    repo.expect_find_all()
        .with(eq(filter.clone()))
        .times(1)
        .return_once(move |_| Ok(vec![stored_task]));

    let tasks = GetTasksUseCase::new(Arc::new(repo))
        .execute(&filter)
        .await
        .expect("listing succeeds");
    assert_eq!(tasks.len(), 1);
}

#[rstest]
#[tokio::test]
async fn get_task_reports_absence_softly(task_id: TaskId) {
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .with(eq(task_id.clone()))
        .times(1)
        .return_once(|_| Ok(None));

    let found = GetTaskUseCase::new(Arc::new(repo))
        .execute(&task_id)
        .await
        .expect("lookup succeeds");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn update_forwards_patch(task_id: TaskId, stored_task: Task) {
    let patch = TaskPatch::default().with_description(Some("Deposit paid".to_owned()));
    let mut expected = stored_task;
    expected.description = Some("Deposit paid".to_owned());
    let returned = expected.clone();

    let mut repo = MockTaskRepository::new();
    repo.expect_update()
        .with(eq(task_id.clone()), eq(patch.clone()))
        .times(1)
        .return_once(move |_, _| Ok(returned));

    let updated = UpdateTaskUseCase::new(Arc::new(repo))
        .execute(&task_id, patch)
        .await
        .expect("update succeeds");
    assert_eq!(updated, expected);
}

#[rstest]
#[tokio::test]
async fn toggle_uses_repository_toggle(task_id: TaskId, stored_task: Task) {
    let mut toggled = stored_task;
    toggled.completed = true;

    let mut repo = MockTaskRepository::new();
    repo.expect_toggle_complete()
        .with(eq(task_id.clone()))
        .times(1)
        .return_once(move |_| Ok(toggled));

    let task = ToggleTaskUseCase::new(Arc::new(repo))
        .execute(&task_id)
        .await
        .expect("toggle succeeds");
    assert!(task.completed);
}

#[rstest]
#[tokio::test]
async fn delete_surfaces_not_found(task_id: TaskId) {
    let mut repo = MockTaskRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|id| Err(DomainError::not_found("Task", id.as_str())));

    let err = DeleteTaskUseCase::new(Arc::new(repo))
        .execute(&task_id)
        .await
        .expect_err("missing task");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Task with id \"1\" not found");
}
