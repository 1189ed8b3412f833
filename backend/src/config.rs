//! Task client configuration loaded via OrthoConfig.
//!
//! Values layer as defaults < configuration file < `TASKS_*` environment
//! variables < command-line overrides. The timeout carries a loader default
//! so an empty environment still yields a settings document; the other raw
//! values stay optional and their accessors apply defaults and validate.

use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Endpoint used when none is configured.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:4000/graphql";
/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const PROGRAM_NAME: &str = "taskctl";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered sources could not be merged.
    #[error("failed to load configuration: {0}")]
    Load(String),
    /// The GraphQL endpoint is not an absolute URL.
    #[error("invalid GraphQL endpoint {value:?}: {source}")]
    InvalidEndpoint {
        /// Rejected endpoint.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The backend name is not recognised.
    #[error("unsupported backend {0:?}; expected \"graphql\" or \"memory\"")]
    UnsupportedBackend(String),
    /// A zero timeout would fail every request.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Repository implementation used by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Remote GraphQL API.
    #[default]
    Graphql,
    /// Process-local demo store.
    Memory,
}

impl BackendKind {
    /// Configuration spelling of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Graphql => "graphql",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "graphql" => Ok(Self::Graphql),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnsupportedBackend(value.to_owned())),
        }
    }
}

/// Configuration values for reaching the task backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKS")]
pub struct TasksSettings {
    /// GraphQL endpoint URL.
    pub graphql_endpoint: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Bearer token sent with every request.
    pub auth_token: Option<String>,
    /// Backend name: `graphql` or `memory`.
    pub backend: Option<String>,
}

impl Default for TasksSettings {
    fn default() -> Self {
        Self {
            graphql_endpoint: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            auth_token: None,
            backend: None,
        }
    }
}

/// Command-line values that take precedence over loaded settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Replacement endpoint.
    pub graphql_endpoint: Option<String>,
    /// Replacement timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Replacement backend.
    pub backend: Option<BackendKind>,
}

impl TasksSettings {
    /// Load settings from defaults, configuration files, and the environment.
    ///
    /// Command-line arguments are parsed by the caller and applied through
    /// [`Self::with_overrides`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be read or merged.
    pub fn load_layered() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)])
            .map_err(|error| ConfigError::Load(error.to_string()))
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(endpoint) = overrides.graphql_endpoint {
            self.graphql_endpoint = Some(endpoint);
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(backend) = overrides.backend {
            self.backend = Some(backend.as_str().to_owned());
        }
        self
    }

    /// Return the configured endpoint, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] when the value is not an
    /// absolute URL.
    pub fn graphql_endpoint(&self) -> Result<Url, ConfigError> {
        let raw = self
            .graphql_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GRAPHQL_ENDPOINT);
        Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        match self.request_timeout_secs {
            0 => Err(ConfigError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the configured bearer token, ignoring blank values.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Return the configured backend, falling back to GraphQL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedBackend`] for unknown names.
    pub fn backend(&self) -> Result<BackendKind, ConfigError> {
        self.backend
            .as_deref()
            .map_or(Ok(BackendKind::default()), str::parse::<BackendKind>)
    }
}
