//! Shared CLI adapter state.
//!
//! Commands accept this state so they only depend on use-case ports and stay
//! testable without I/O.

use std::sync::Arc;

use crate::application::{
    CreateTask, DeleteTask, GetTask, GetTasks, TaskUseCases, ToggleTask, UpdateTask,
};
use crate::domain::ports::TaskRepository;

/// Dependency bundle for CLI commands.
#[derive(Clone)]
pub struct CliState {
    pub get_tasks: Arc<dyn GetTasks>,
    pub get_task: Arc<dyn GetTask>,
    pub create_task: Arc<dyn CreateTask>,
    pub update_task: Arc<dyn UpdateTask>,
    pub toggle_task: Arc<dyn ToggleTask>,
    pub delete_task: Arc<dyn DeleteTask>,
}

impl<R> From<TaskUseCases<R>> for CliState
where
    R: TaskRepository + 'static,
{
    fn from(use_cases: TaskUseCases<R>) -> Self {
        Self {
            get_tasks: Arc::new(use_cases.get_tasks),
            get_task: Arc::new(use_cases.get_task),
            create_task: Arc::new(use_cases.create_task),
            update_task: Arc::new(use_cases.update_task),
            toggle_task: Arc::new(use_cases.toggle_task),
            delete_task: Arc::new(use_cases.delete_task),
        }
    }
}
