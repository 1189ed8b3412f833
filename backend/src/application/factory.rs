//! Composition root for the task use cases.

use std::sync::Arc;

use super::use_cases::{
    CreateTaskUseCase, DeleteTaskUseCase, GetTaskUseCase, GetTasksUseCase, ToggleTaskUseCase,
    UpdateTaskUseCase,
};

/// Every task use case, wired to one shared repository.
///
/// The bundle is built explicitly and handed to its callers; nothing is
/// registered globally.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use tasks::application::{GetTasks, TaskUseCases};
/// use tasks::domain::TaskFilter;
/// use tasks::domain::ports::FixtureTaskRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let use_cases = TaskUseCases::new(Arc::new(FixtureTaskRepository));
/// let tasks = use_cases.get_tasks.execute(&TaskFilter::default()).await;
/// assert_eq!(tasks, Ok(Vec::new()));
/// # });
/// ```
pub struct TaskUseCases<R> {
    /// List tasks.
    pub get_tasks: GetTasksUseCase<R>,
    /// Look up one task.
    pub get_task: GetTaskUseCase<R>,
    /// Create a task.
    pub create_task: CreateTaskUseCase<R>,
    /// Patch a task.
    pub update_task: UpdateTaskUseCase<R>,
    /// Toggle completion.
    pub toggle_task: ToggleTaskUseCase<R>,
    /// Delete a task.
    pub delete_task: DeleteTaskUseCase<R>,
}

impl<R> TaskUseCases<R> {
    /// Wire every use case to `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            get_tasks: GetTasksUseCase::new(Arc::clone(&repository)),
            get_task: GetTaskUseCase::new(Arc::clone(&repository)),
            create_task: CreateTaskUseCase::new(Arc::clone(&repository)),
            update_task: UpdateTaskUseCase::new(Arc::clone(&repository)),
            toggle_task: ToggleTaskUseCase::new(Arc::clone(&repository)),
            delete_task: DeleteTaskUseCase::new(repository),
        }
    }
}
