//! Translation of GraphQL client failures into domain errors.
//!
//! Structured signals win: HTTP status codes and GraphQL `extensions.code`
//! values are classified first. Message sniffing only applies when neither
//! carries a recognised code. Servers that report a missing row through a
//! generic error ("No record was found", "Record to delete does not exist")
//! are recognised by message when the operation addressed a task.

use tracing::debug;

use super::client::GraphQlClientError;
use crate::domain::{DomainError, TASK_ENTITY, TaskId};

const UNAUTHORIZED_MARKERS: &[&str] = &["unauthorized", "401", "forbidden"];
const NETWORK_MARKERS: &[&str] = &["network", "fetch", "connection", "timeout"];
const NOT_FOUND_MARKERS: &[&str] = &["not found", "no record", "does not exist"];

/// Convert a client failure into a [`DomainError`].
///
/// `target` names the task the operation addressed, so a `NOT_FOUND` code
/// from the server can identify it.
pub(super) fn map_client_error(error: GraphQlClientError, target: Option<&TaskId>) -> DomainError {
    let mapped = classify(&error, target);
    debug!(code = %mapped.code(), %error, "graphql operation failed");
    mapped
}

fn classify(error: &GraphQlClientError, target: Option<&TaskId>) -> DomainError {
    match error {
        GraphQlClientError::Transport { message }
        | GraphQlClientError::Timeout { message }
        | GraphQlClientError::Decode { message } => {
            DomainError::network_caused_by(message.clone(), error.clone())
        }
        GraphQlClientError::Status { status, message } => match status {
            401 | 403 => DomainError::unauthorized_with(message.clone()),
            _ => DomainError::network_caused_by(message.clone(), error.clone()),
        },
        GraphQlClientError::GraphQl { message, code } => {
            classify_graphql_code(code.as_deref(), message, target)
                .unwrap_or_else(|| classify_message(message, target))
        }
    }
}

fn classify_graphql_code(
    code: Option<&str>,
    message: &str,
    target: Option<&TaskId>,
) -> Option<DomainError> {
    match code? {
        "UNAUTHENTICATED" | "FORBIDDEN" => Some(DomainError::unauthorized_with(message)),
        "BAD_USER_INPUT" | "GRAPHQL_VALIDATION_FAILED" => Some(DomainError::validation(message)),
        "NOT_FOUND" => target.map(|id| DomainError::not_found(TASK_ENTITY, id.as_str())),
        _ => None,
    }
}

fn classify_message(message: &str, target: Option<&TaskId>) -> DomainError {
    let lowered = message.to_lowercase();
    let mentions = |markers: &[&str]| markers.iter().any(|marker| lowered.contains(marker));

    if mentions(UNAUTHORIZED_MARKERS) {
        DomainError::unauthorized_with(message)
    } else if mentions(NETWORK_MARKERS) {
        DomainError::network(message)
    } else if let Some(id) = target.filter(|_| mentions(NOT_FOUND_MARKERS)) {
        DomainError::not_found(TASK_ENTITY, id.as_str())
    } else {
        DomainError::unknown(message)
    }
}
