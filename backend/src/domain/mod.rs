//! Domain primitives, the error taxonomy, and the ports they flow through.
//!
//! Purpose: define the task entity, the result convention used in place of
//! panics for expected failures, and the repository port that keeps use cases
//! independent of any transport. Types are immutable once validated; each
//! type's Rustdoc records its invariants.
//!
//! Public surface:
//! - `DomainResult`, `success`, `failure`: the result convention.
//! - `DomainError`, `ErrorCode`: the closed failure taxonomy.
//! - `Task`, `TaskId`, `TaskTitle`, `NewTask`, `TaskPatch`, `TaskFilter`.
//! - `ports::TaskRepository`: the persistence/transport port.

pub mod error;
pub mod outcome;
pub mod ports;
pub mod task;

pub use self::error::{
    DEFAULT_UNAUTHORIZED_MESSAGE, DomainError, DomainErrorPayloadError, ErrorCause, ErrorCode,
};
pub use self::outcome::{DomainResult, failure, success};
pub use self::task::{
    NewTask, TASK_ENTITY, TASK_TITLE_MIN, Task, TaskFilter, TaskId, TaskPatch, TaskTitle,
    TaskValidationError,
};
