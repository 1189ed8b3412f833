//! Domain-level error taxonomy.
//!
//! These errors are transport agnostic. Outbound adapters translate their own
//! failures into [`DomainError`] before anything crosses into the application
//! layer, and presentation adapters render them however their protocol needs.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used when an unauthorised failure carries no better description.
pub const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

/// Stable machine-readable tag describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The target entity does not exist.
    NotFound,
    /// Input failed a schema or business rule.
    ValidationError,
    /// Transport or communication failure.
    NetworkError,
    /// Caller lacks valid credentials.
    Unauthorized,
    /// Failure the transport could not classify.
    UnknownError,
}

impl ErrorCode {
    /// Wire tag for the code, e.g. `NOT_FOUND`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying cause retained by [`DomainError::Network`].
pub type ErrorCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Business-meaningful failure surfaced through [`super::DomainResult`].
///
/// ## Invariants
/// - Every variant maps to exactly one [`ErrorCode`].
/// - `NotFound` renders as `{entity} with id "{id}" not found`.
///
/// # Examples
/// ```
/// use tasks::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_found("Task", "42");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Task with id \"42\" not found");
/// ```
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(try_from = "DomainErrorDto", into = "DomainErrorDto")]
pub enum DomainError {
    /// A lookup, update, or delete targeted an unknown identifier.
    #[error("{entity} with id \"{id}\" not found")]
    NotFound {
        /// Entity type name, e.g. `Task`.
        entity: String,
        /// Identifier that could not be resolved.
        id: String,
    },
    /// Input failed schema or business validation.
    #[error("{message}")]
    Validation {
        /// Human-readable description.
        message: String,
        /// Offending field, when known.
        field: Option<String>,
        /// Structured details for adapters.
        details: Option<Value>,
    },
    /// Transport failure; the original error is kept as the source.
    #[error("{message}")]
    Network {
        /// Human-readable description.
        message: String,
        /// Error raised by the transport, when one exists.
        #[source]
        cause: Option<ErrorCause>,
    },
    /// Missing, expired, or rejected credentials.
    #[error("{message}")]
    Unauthorized {
        /// Human-readable description.
        message: String,
    },
    /// Anything the transport could not classify.
    #[error("{message}")]
    Unknown {
        /// Original failure message.
        message: String,
    },
}

impl DomainError {
    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            details: None,
        }
    }

    /// Validation failure attributed to a single input field.
    pub fn invalid_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            details: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::NetworkError`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            cause: None,
        }
    }

    /// Network failure that keeps the transport error as its source.
    pub fn network_caused_by<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Unauthorised failure using [`DEFAULT_UNAUTHORIZED_MESSAGE`].
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::unauthorized_with(DEFAULT_UNAUTHORIZED_MESSAGE)
    }

    /// Unauthorised failure with a custom message.
    pub fn unauthorized_with(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::UnknownError`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Attach structured details to a validation failure.
    ///
    /// Other kinds carry no details and are returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use tasks::domain::DomainError;
    ///
    /// let err = DomainError::invalid_field("too short", "title")
    ///     .with_details(json!({ "min": 3 }));
    /// assert_eq!(err.details(), Some(&json!({ "min": 3 })));
    /// ```
    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        match self {
            Self::Validation { message, field, .. } => Self::Validation {
                message,
                field,
                details: Some(details),
            },
            other => other,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Network { .. } => ErrorCode::NetworkError,
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::Unknown { .. } => ErrorCode::UnknownError,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Offending field for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Structured validation details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl PartialEq for DomainError {
    /// Causes compare by rendered message; trait objects have no equality.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::NotFound { entity, id },
                Self::NotFound {
                    entity: other_entity,
                    id: other_id,
                },
            ) => entity == other_entity && id == other_id,
            (
                Self::Validation {
                    message,
                    field,
                    details,
                },
                Self::Validation {
                    message: other_message,
                    field: other_field,
                    details: other_details,
                },
            ) => message == other_message && field == other_field && details == other_details,
            (
                Self::Network { message, cause },
                Self::Network {
                    message: other_message,
                    cause: other_cause,
                },
            ) => {
                message == other_message
                    && cause.as_ref().map(ToString::to_string)
                        == other_cause.as_ref().map(ToString::to_string)
            }
            (Self::Unauthorized { message }, Self::Unauthorized { message: other })
            | (Self::Unknown { message }, Self::Unknown { message: other }) => message == other,
            _ => false,
        }
    }
}

/// Errors raised when a serialised error payload is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainErrorPayloadError {
    /// `NOT_FOUND` payloads must name the entity and identifier.
    #[error("NOT_FOUND payload must include entity and id")]
    MissingNotFoundTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for DomainErrorDto {
    fn from(value: DomainError) -> Self {
        let code = value.code();
        let message = value.message();
        let mut dto = Self {
            code,
            message,
            entity: None,
            id: None,
            field: None,
            details: None,
        };
        match value {
            DomainError::NotFound { entity, id } => {
                dto.entity = Some(entity);
                dto.id = Some(id);
            }
            DomainError::Validation { field, details, .. } => {
                dto.field = field;
                dto.details = details;
            }
            DomainError::Network { .. }
            | DomainError::Unauthorized { .. }
            | DomainError::Unknown { .. } => {}
        }
        dto
    }
}

impl TryFrom<DomainErrorDto> for DomainError {
    type Error = DomainErrorPayloadError;

    fn try_from(value: DomainErrorDto) -> Result<Self, Self::Error> {
        let DomainErrorDto {
            code,
            message,
            entity,
            id,
            field,
            details,
        } = value;

        Ok(match code {
            ErrorCode::NotFound => match (entity, id) {
                (Some(entity), Some(id)) => Self::NotFound { entity, id },
                _ => return Err(DomainErrorPayloadError::MissingNotFoundTarget),
            },
            ErrorCode::ValidationError => Self::Validation {
                message,
                field,
                details,
            },
            ErrorCode::NetworkError => Self::network(message),
            ErrorCode::Unauthorized => Self::unauthorized_with(message),
            ErrorCode::UnknownError => Self::unknown(message),
        })
    }
}
