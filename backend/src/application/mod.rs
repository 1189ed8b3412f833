//! Application layer: one use case per user intent.
//!
//! Use cases depend only on [`crate::domain::ports::TaskRepository`] and pass
//! repository results through unchanged. [`TaskUseCases`] is the composition
//! root that wires one repository into every use case.

mod factory;
mod use_cases;

pub use factory::TaskUseCases;
pub use use_cases::{
    CreateTask, CreateTaskUseCase, DeleteTask, DeleteTaskUseCase, GetTask, GetTaskUseCase,
    GetTasks, GetTasksUseCase, ToggleTask, ToggleTaskUseCase, UpdateTask, UpdateTaskUseCase,
};
#[cfg(test)]
pub use use_cases::{
    MockCreateTask, MockDeleteTask, MockGetTask, MockGetTasks, MockToggleTask, MockUpdateTask,
};
