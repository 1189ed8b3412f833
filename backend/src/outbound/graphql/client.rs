//! Transport seam between the GraphQL repository and an HTTP client.
//!
//! The repository speaks in documents and JSON variables; implementations own
//! the wire protocol and report failures as [`GraphQlClientError`].

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::define_port_error;

/// Successful GraphQL response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQlResponse {
    /// The `data` member; `None` when the server returned no payload.
    pub data: Option<Value>,
}

impl GraphQlResponse {
    /// Wrap a `data` payload.
    #[must_use]
    pub const fn with_data(data: Value) -> Self {
        Self { data: Some(data) }
    }

    /// Return the non-null value stored under `field` in `data`.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&Value> {
        self.data
            .as_ref()
            .and_then(|data| data.get(field))
            .filter(|value| !value.is_null())
    }
}

define_port_error! {
    /// Errors surfaced while executing a GraphQL operation.
    pub enum GraphQlClientError {
        /// The request never produced a response.
        Transport { message: String } =>
            "graphql transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "graphql request timed out: {message}",
        /// The endpoint answered with a non-success HTTP status.
        Status { status: u16, message: String } =>
            "graphql endpoint returned status {status}: {message}",
        /// The response body was not a GraphQL envelope.
        Decode { message: String } =>
            "graphql response decode failed: {message}",
        /// The server reported an error in the `errors` member.
        GraphQl { message: String, code: Option<String> } =>
            "graphql error: {message}",
    }
}

/// Executes GraphQL documents against a remote endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Run a query document.
    async fn query(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphQlResponse, GraphQlClientError>;

    /// Run a mutation document.
    async fn mutate(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphQlResponse, GraphQlClientError>;
}
