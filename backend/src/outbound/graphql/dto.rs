//! DTOs for the GraphQL wire format.
//!
//! Request and response envelopes are used by the HTTP client; the task record
//! is decoded by the mapper before it becomes a domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Task, TaskId, TaskTitle};

use super::mapper::TaskMappingError;

#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequestDto<'a> {
    pub(super) query: &'a str,
    pub(super) variables: &'a Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlEnvelopeDto {
    #[serde(default)]
    pub(super) data: Option<Value>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlErrorDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlErrorDto {
    pub(super) message: String,
    #[serde(default)]
    pub(super) extensions: Option<GraphQlErrorExtensionsDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlErrorExtensionsDto {
    #[serde(default)]
    pub(super) code: Option<String>,
}

impl GraphQlErrorDto {
    pub(super) fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.code.as_deref())
    }
}

/// Task record as returned by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskRecordDto {
    pub(super) id: String,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) completed: bool,
    pub(super) created_at: DateValueDto,
    pub(super) updated_at: DateValueDto,
}

/// Dates arrive as ISO-8601 text or epoch milliseconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum DateValueDto {
    Millis(i64),
    Text(String),
}

impl DateValueDto {
    fn into_utc(self, field: &'static str) -> Result<DateTime<Utc>, TaskMappingError> {
        match self {
            Self::Millis(millis) => DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                TaskMappingError::Timestamp {
                    field,
                    value: millis.to_string(),
                }
            }),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| TaskMappingError::Timestamp { field, value: text }),
        }
    }
}

impl TaskRecordDto {
    pub(super) fn into_domain(self) -> Result<Task, TaskMappingError> {
        Ok(Task {
            id: TaskId::new(self.id)?,
            title: TaskTitle::new(self.title)?,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at.into_utc("createdAt")?,
            updated_at: self.updated_at.into_utc("updatedAt")?,
        })
    }
}
