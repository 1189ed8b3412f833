//! Driving ports for task intents and their repository-backed services.
//!
//! Every service forwards to exactly one [`TaskRepository`] method and returns
//! its result unchanged. Services hold no state beyond the shared repository
//! handle.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::TaskRepository;
use crate::domain::{DomainResult, NewTask, Task, TaskFilter, TaskId, TaskPatch};

/// List tasks matching a filter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetTasks: Send + Sync {
    /// Return every task matching `filter`.
    async fn execute(&self, filter: &TaskFilter) -> DomainResult<Vec<Task>>;
}

/// Look up a single task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetTask: Send + Sync {
    /// Return the task with `id`, or `None` when it does not exist.
    async fn execute(&self, id: &TaskId) -> DomainResult<Option<Task>>;
}

/// Create a task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreateTask: Send + Sync {
    /// Persist `input` and return the stored task.
    async fn execute(&self, input: NewTask) -> DomainResult<Task>;
}

/// Apply a partial update to a task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpdateTask: Send + Sync {
    /// Apply `patch` to the task with `id`.
    async fn execute(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task>;
}

/// Flip the completion flag of a task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToggleTask: Send + Sync {
    /// Toggle the task with `id` and return its new state.
    async fn execute(&self, id: &TaskId) -> DomainResult<Task>;
}

/// Remove a task.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeleteTask: Send + Sync {
    /// Delete the task with `id` and return its last-known state.
    async fn execute(&self, id: &TaskId) -> DomainResult<Task>;
}

/// [`GetTasks`] over a [`TaskRepository`].
pub struct GetTasksUseCase<R> {
    repository: Arc<R>,
}

impl<R> GetTasksUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetTasks for GetTasksUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, filter: &TaskFilter) -> DomainResult<Vec<Task>> {
        self.repository.find_all(filter).await
    }
}

/// [`GetTask`] over a [`TaskRepository`].
pub struct GetTaskUseCase<R> {
    repository: Arc<R>,
}

impl<R> GetTaskUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetTask for GetTaskUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        self.repository.find_by_id(id).await
    }
}

/// [`CreateTask`] over a [`TaskRepository`].
pub struct CreateTaskUseCase<R> {
    repository: Arc<R>,
}

impl<R> CreateTaskUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateTask for CreateTaskUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, input: NewTask) -> DomainResult<Task> {
        self.repository.create(input).await
    }
}

/// [`UpdateTask`] over a [`TaskRepository`].
pub struct UpdateTaskUseCase<R> {
    repository: Arc<R>,
}

impl<R> UpdateTaskUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UpdateTask for UpdateTaskUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task> {
        self.repository.update(id, patch).await
    }
}

/// [`ToggleTask`] over a [`TaskRepository`].
pub struct ToggleTaskUseCase<R> {
    repository: Arc<R>,
}

impl<R> ToggleTaskUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ToggleTask for ToggleTaskUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, id: &TaskId) -> DomainResult<Task> {
        self.repository.toggle_complete(id).await
    }
}

/// [`DeleteTask`] over a [`TaskRepository`].
pub struct DeleteTaskUseCase<R> {
    repository: Arc<R>,
}

impl<R> DeleteTaskUseCase<R> {
    /// Create the use case over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeleteTask for DeleteTaskUseCase<R>
where
    R: TaskRepository,
{
    async fn execute(&self, id: &TaskId) -> DomainResult<Task> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
#[path = "use_cases_tests.rs"]
mod tests;
