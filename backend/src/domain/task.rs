//! Task entity and the inputs used to create, update, and filter it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use super::DomainError;

/// Entity type name used in [`DomainError::NotFound`] payloads.
pub const TASK_ENTITY: &str = "Task";

/// Minimum number of characters in a task title.
pub const TASK_TITLE_MIN: usize = 3;

/// Validation errors returned by the task constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    /// Identifier is the empty string.
    #[error("task id must not be empty")]
    EmptyId,
    /// Title is shorter than [`TASK_TITLE_MIN`].
    #[error("task title must be at least {min} characters")]
    TitleTooShort {
        /// Required minimum length.
        min: usize,
        /// Length of the rejected title.
        actual: usize,
    },
}

impl TaskValidationError {
    /// Input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::TitleTooShort { .. } => "title",
        }
    }
}

impl From<TaskValidationError> for DomainError {
    fn from(value: TaskValidationError) -> Self {
        let error = Self::invalid_field(value.to_string(), value.field());
        match value {
            TaskValidationError::EmptyId => error,
            TaskValidationError::TitleTooShort { min, actual } => {
                error.with_details(json!({ "min": min, "actual": actual }))
            }
        }
    }
}

/// Opaque, backing-store assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Validate and construct a [`TaskId`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyId`] for the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, TaskValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Task title of at least [`TASK_TITLE_MIN`] characters.
///
/// The length is measured on the raw string; surrounding whitespace counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validate and construct a [`TaskTitle`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::TitleTooShort`] when the title has
    /// fewer than [`TASK_TITLE_MIN`] characters.
    ///
    /// # Examples
    /// ```
    /// use tasks::domain::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("ab").is_err());
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let title = title.into();
        let actual = title.chars().count();
        if actual < TASK_TITLE_MIN {
            return Err(TaskValidationError::TitleTooShort {
                min: TASK_TITLE_MIN,
                actual,
            });
        }
        Ok(Self(title))
    }

    /// Borrow the title.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The task entity.
///
/// ## Invariants
/// - `id` is non-empty.
/// - `title` has at least [`TASK_TITLE_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Backing-store assigned identifier.
    pub id: TaskId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Return a copy with `patch` applied and `updated_at` set to `now`.
    ///
    /// Absent patch fields leave the current values untouched.
    #[must_use]
    pub fn patched(mut self, patch: &TaskPatch, now: DateTime<Utc>) -> Self {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
        self
    }
}

/// Input for creating a task; identity and timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<String>,
}

impl NewTask {
    /// Validate raw input into a [`NewTask`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::TitleTooShort`] for short titles.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            description,
        })
    }
}

/// Partial update for a task.
///
/// `description` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only sets the completion flag.
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Set a replacement title after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::TitleTooShort`] for short titles.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        self.title = Some(TaskTitle::new(title)?);
        Ok(self)
    }

    /// Set or clear the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Whether the patch changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Criteria for listing tasks. The default filter matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks with this completion flag.
    pub completed: Option<bool>,
    /// Only tasks whose title contains this text, ignoring case.
    pub title_contains: Option<String>,
}

impl TaskFilter {
    /// Filter on the completion flag.
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            title_contains: None,
        }
    }

    /// Whether `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let completion_matches = self
            .completed
            .is_none_or(|completed| task.completed == completed);
        let title_matches = self.title_contains.as_deref().is_none_or(|needle| {
            task.title
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        completion_matches && title_matches
    }
}

#[cfg(test)]
mod tests;
