//! In-memory [`TaskRepository`].
//!
//! Tasks live in a `Vec` guarded by a mutex held for one operation at a time.
//! Listings return the newest task first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::TaskRepository;
use crate::domain::{
    DomainError, DomainResult, NewTask, TASK_ENTITY, Task, TaskFilter, TaskId, TaskPatch,
    TaskTitle,
};

/// Demo tasks loaded by [`InMemoryTaskRepository::seeded`], oldest first.
const DEMO_TASKS: [(&str, &str, bool); 5] = [
    (
        "Set up the development environment",
        "Configure environment variables and project dependencies",
        true,
    ),
    ("Implement authentication", "Add JWT-based authentication", false),
    ("Write unit tests", "Cover the main use cases with tests", false),
    ("Document the API", "Write the GraphQL API documentation", false),
    ("Configure CI/CD", "Set up the automated deployment pipeline", false),
];

/// Task repository that keeps every task in process memory.
pub struct InMemoryTaskRepository {
    tasks: Mutex<Vec<Task>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTaskRepository {
    /// Create an empty repository stamping tasks with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_tasks(clock, Vec::new())
    }

    /// Create a repository holding `tasks`, oldest first.
    pub fn with_tasks(clock: Arc<dyn Clock>, tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            clock,
        }
    }

    /// Create a repository preloaded with demo tasks.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        let now = clock.utc();
        let tasks = DEMO_TASKS
            .iter()
            .filter_map(|(title, description, completed)| {
                let title = TaskTitle::new(*title).ok()?;
                Some(Task {
                    id: new_task_id().ok()?,
                    title,
                    description: Some((*description).to_owned()),
                    completed: *completed,
                    created_at: now,
                    updated_at: now,
                })
            })
            .collect();
        Self::with_tasks(clock, tasks)
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no task is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        // A panic mid-operation leaves the vector intact; keep serving it.
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn new_task_id() -> DomainResult<TaskId> {
    Ok(TaskId::new(Uuid::new_v4().to_string())?)
}

fn not_found(id: &TaskId) -> DomainError {
    DomainError::not_found(TASK_ENTITY, id.as_str())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_all(&self, filter: &TaskFilter) -> DomainResult<Vec<Task>> {
        Ok(self
            .lock()
            .iter()
            .rev()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        Ok(self.lock().iter().find(|task| task.id == *id).cloned())
    }

    async fn create(&self, input: NewTask) -> DomainResult<Task> {
        let now = self.clock.utc();
        let task = Task {
            id: new_task_id()?,
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.lock().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task> {
        let now = self.clock.utc();
        let mut tasks = self.lock();
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or_else(|| not_found(id))?;
        *slot = slot.clone().patched(&patch, now);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<Task> {
        let mut tasks = self.lock();
        let index = tasks
            .iter()
            .position(|task| task.id == *id)
            .ok_or_else(|| not_found(id))?;
        Ok(tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour of the in-memory repository.

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, hour, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn repository() -> InMemoryTaskRepository {
        InMemoryTaskRepository::new(Arc::new(FixtureClock(at(8))))
    }

    fn missing_id() -> TaskId {
        TaskId::new("missing").expect("valid id")
    }

    async fn create(repository: &InMemoryTaskRepository, title: &str) -> Task {
        repository
            .create(NewTask::new(title, None).expect("valid input"))
            .await
            .expect("create succeeds")
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_identity_and_timestamps(repository: InMemoryTaskRepository) {
        let task = create(&repository, "Plan sprint").await;

        assert!(Uuid::parse_str(task.id.as_str()).is_ok());
        assert!(!task.completed);
        assert_eq!(task.created_at, at(8));
        assert_eq!(task.updated_at, at(8));
        assert_eq!(repository.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_lists_newest_first(repository: InMemoryTaskRepository) {
        create(&repository, "First task").await;
        create(&repository, "Second task").await;

        let titles: Vec<String> = repository
            .find_all(&TaskFilter::default())
            .await
            .expect("listing succeeds")
            .into_iter()
            .map(|task| task.title.to_string())
            .collect();
        assert_eq!(titles, ["Second task", "First task"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_applies_filter(repository: InMemoryTaskRepository) {
        let done = create(&repository, "Ship release").await;
        create(&repository, "Ship docs").await;
        repository
            .toggle_complete(&done.id)
            .await
            .expect("toggle succeeds");

        let open = repository
            .find_all(&TaskFilter::completed(false))
            .await
            .expect("listing succeeds");
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title.as_str(), "Ship docs");
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_report_absence_softly(repository: InMemoryTaskRepository) {
        let found = repository
            .find_by_id(&missing_id())
            .await
            .expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn writes_on_unknown_ids_report_not_found(repository: InMemoryTaskRepository) {
        let id = missing_id();
        let update = repository.update(&id, TaskPatch::completion(true)).await;
        let delete = repository.delete(&id).await;
        let toggle = repository.toggle_complete(&id).await;

        for result in [update, delete, toggle] {
            let err = result.expect_err("unknown id");
            assert_eq!(err.code(), ErrorCode::NotFound);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn toggle_flips_and_persists(repository: InMemoryTaskRepository) {
        let task = create(&repository, "Water plants").await;

        let toggled = repository
            .toggle_complete(&task.id)
            .await
            .expect("toggle succeeds");
        assert!(toggled.completed);

        let stored = repository
            .find_by_id(&task.id)
            .await
            .expect("lookup succeeds")
            .expect("task exists");
        assert!(stored.completed);
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_patch(repository: InMemoryTaskRepository) {
        let task = create(&repository, "Draft post").await;
        let patch = TaskPatch::default()
            .with_title("Publish post")
            .expect("valid title")
            .with_description(Some("Cross-post to the blog".to_owned()));

        let updated = repository
            .update(&task.id, patch)
            .await
            .expect("update succeeds");
        assert_eq!(updated.title.as_str(), "Publish post");
        assert_eq!(
            updated.description.as_deref(),
            Some("Cross-post to the blog")
        );
        assert_eq!(updated.created_at, task.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_removed_task(repository: InMemoryTaskRepository) {
        let task = create(&repository, "Temporary").await;

        let removed = repository.delete(&task.id).await.expect("delete succeeds");
        assert_eq!(removed, task);
        assert!(repository.is_empty());
    }

    #[rstest]
    fn seeded_repository_holds_demo_tasks() {
        let repository = InMemoryTaskRepository::seeded(Arc::new(FixtureClock(at(9))));
        assert_eq!(repository.len(), DEMO_TASKS.len());
    }
}
