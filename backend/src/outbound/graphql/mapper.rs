//! Validation of server task records into domain entities.
//!
//! Strict variants fail on the first invalid record; safe variants drop
//! invalid records and log them at `warn`.

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

use super::dto::TaskRecordDto;
use crate::domain::{DomainError, Task, TaskValidationError};

/// Message attached to every mapping failure that reaches the domain.
pub const INVALID_TASK_DATA: &str = "Invalid task data received from server";

/// Reasons a server record cannot become a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskMappingError {
    /// The record does not have the task shape.
    #[error("malformed task record: {0}")]
    Malformed(String),
    /// A field violates an entity invariant.
    #[error(transparent)]
    Invalid(#[from] TaskValidationError),
    /// A timestamp is neither RFC 3339 text nor epoch milliseconds.
    #[error("invalid {field} timestamp: {value}")]
    Timestamp {
        /// Wire name of the timestamp field.
        field: &'static str,
        /// Rejected raw value.
        value: String,
    },
}

impl TaskMappingError {
    /// Wire field the failure refers to, when known.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Malformed(_) => None,
            Self::Invalid(error) => Some(error.field()),
            Self::Timestamp { field, .. } => Some(*field),
        }
    }
}

impl From<TaskMappingError> for DomainError {
    fn from(value: TaskMappingError) -> Self {
        let error = match value.field() {
            Some(field) => Self::invalid_field(INVALID_TASK_DATA, field),
            None => Self::validation(INVALID_TASK_DATA),
        };
        error.with_details(json!({ "reason": value.to_string() }))
    }
}

/// Maps raw server records into validated tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskMapper;

impl TaskMapper {
    /// Validate one record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMappingError`] when the record is malformed or violates
    /// an entity invariant.
    pub fn to_domain(raw: &Value) -> Result<Task, TaskMappingError> {
        TaskRecordDto::deserialize(raw)
            .map_err(|error| TaskMappingError::Malformed(error.to_string()))?
            .into_domain()
    }

    /// Validate every record, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskMappingError`] of the first invalid record.
    pub fn to_domain_list(raw: &[Value]) -> Result<Vec<Task>, TaskMappingError> {
        raw.iter().map(Self::to_domain).collect()
    }

    /// Validate one record, returning `None` when it is invalid.
    #[must_use]
    pub fn to_domain_safe(raw: &Value) -> Option<Task> {
        Self::to_domain(raw).ok()
    }

    /// Validate every record and keep only the valid ones.
    #[must_use]
    pub fn to_domain_list_safe(raw: &[Value]) -> Vec<Task> {
        raw.iter()
            .enumerate()
            .filter_map(|(index, record)| match Self::to_domain(record) {
                Ok(task) => Some(task),
                Err(error) => {
                    warn!(index, %error, "dropping invalid task record");
                    None
                }
            })
            .collect()
    }
}
