//! Reqwest-backed GraphQL client.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and HTTP error mapping, and decoding of the GraphQL
//! response envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Request, StatusCode, Url};
use serde_json::Value;

use super::client::{GraphQlClient, GraphQlClientError, GraphQlResponse};
use super::dto::{GraphQlEnvelopeDto, GraphQlRequestDto};

const USER_AGENT: &str = concat!("taskctl/", env!("CARGO_PKG_VERSION"));

/// GraphQL client that POSTs documents to one endpoint.
pub struct ReqwestGraphQlClient {
    client: Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl ReqwestGraphQlClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            auth_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the POST carrying `document`, `variables`, and the bearer token.
    fn build_request(
        &self,
        document: &str,
        variables: &Value,
    ) -> Result<Request, GraphQlClientError> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&GraphQlRequestDto {
                query: document,
                variables,
            });
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder.build().map_err(map_transport_error)
    }

    async fn execute(
        &self,
        document: &str,
        variables: &Value,
    ) -> Result<GraphQlResponse, GraphQlClientError> {
        let request = self.build_request(document, variables)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_envelope(body.as_ref())
    }
}

#[async_trait]
impl GraphQlClient for ReqwestGraphQlClient {
    async fn query(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphQlResponse, GraphQlClientError> {
        self.execute(document, &variables).await
    }

    async fn mutate(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphQlResponse, GraphQlClientError> {
        self.execute(document, &variables).await
    }
}

/// Decode a response body, surfacing the first GraphQL error if any.
fn parse_envelope(body: &[u8]) -> Result<GraphQlResponse, GraphQlClientError> {
    let envelope: GraphQlEnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        GraphQlClientError::decode(format!("invalid GraphQL JSON payload: {error}"))
    })?;

    if let Some(first) = envelope.errors.first() {
        return Err(GraphQlClientError::graph_ql(
            first.message.as_str(),
            first.code().map(str::to_owned),
        ));
    }

    Ok(GraphQlResponse {
        data: envelope.data.filter(|data| !data.is_null()),
    })
}

fn map_transport_error(error: reqwest::Error) -> GraphQlClientError {
    if error.is_timeout() {
        GraphQlClientError::timeout(error.to_string())
    } else {
        GraphQlClientError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GraphQlClientError {
    // A non-2xx body may still be a GraphQL error envelope. Its code wins
    // unless the status already reports an auth failure.
    match parse_envelope(body) {
        Err(error @ GraphQlClientError::GraphQl { .. })
            if !matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) =>
        {
            return error;
        }
        _ => {}
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GraphQlClientError::timeout(message)
        }
        _ => GraphQlClientError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
