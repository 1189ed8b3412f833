//! Port for task persistence and transport.
//!
//! [`TaskRepository`] is the only persistence contract the application layer
//! depends on, so GraphQL, in-memory, or mock adapters can be swapped without
//! touching use cases. Every adapter reports failures through
//! [`DomainResult`]; none may panic across this boundary.

use async_trait::async_trait;

use crate::domain::{
    DomainError, DomainResult, NewTask, TASK_ENTITY, Task, TaskFilter, TaskId, TaskPatch,
};

/// Entity-oriented CRUD port for tasks.
///
/// Reads report absence softly (`Ok(None)` from [`Self::find_by_id`]);
/// writes report absence as [`DomainError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Return every task matching `filter`. An empty list is a success.
    async fn find_all(&self, filter: &TaskFilter) -> DomainResult<Vec<Task>>;

    /// Return the task with `id`, or `None` when it does not exist.
    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>>;

    /// Create a task; the backing store assigns identity and timestamps.
    async fn create(&self, input: NewTask) -> DomainResult<Task>;

    /// Apply `patch` to an existing task.
    ///
    /// Fails with [`DomainError::NotFound`] when `id` is unknown.
    async fn update(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task>;

    /// Delete a task and return its last-known state.
    ///
    /// Fails with [`DomainError::NotFound`] when `id` is unknown.
    async fn delete(&self, id: &TaskId) -> DomainResult<Task>;

    /// Flip the completion flag of a task.
    ///
    /// The default implementation reads the task and then writes the flipped
    /// flag through [`Self::update`]. The two steps are not atomic, so
    /// concurrent toggles race and the last write wins.
    async fn toggle_complete(&self, id: &TaskId) -> DomainResult<Task> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(TASK_ENTITY, id.as_str()))?;
        self.update(id, TaskPatch::completion(!current.completed))
            .await
    }
}

/// Fixture implementation for tests that do not exercise task storage.
///
/// Reads are empty and every write targets a missing task.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskRepository;

#[async_trait]
impl TaskRepository for FixtureTaskRepository {
    async fn find_all(&self, _filter: &TaskFilter) -> DomainResult<Vec<Task>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &TaskId) -> DomainResult<Option<Task>> {
        Ok(None)
    }

    async fn create(&self, _input: NewTask) -> DomainResult<Task> {
        Err(DomainError::unknown("fixture repository does not store tasks"))
    }

    async fn update(&self, id: &TaskId, _patch: TaskPatch) -> DomainResult<Task> {
        Err(DomainError::not_found(TASK_ENTITY, id.as_str()))
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<Task> {
        Err(DomainError::not_found(TASK_ENTITY, id.as_str()))
    }
}
