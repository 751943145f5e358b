//! Assistant error types

use crate::db::DbError;
use thiserror::Error;

/// Failure talking to the external agent, with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AgentError {
    pub kind: AgentErrorKind,
    pub message: String,
}

impl AgentError {
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Timeout, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidResponse, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Unknown, message)
    }
}

/// Error classification for logging and the API layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// Connection failures
    Network,
    /// No response within the configured bound
    Timeout,
    /// Credentials rejected (401, 403)
    Auth,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Body was not JSON
    InvalidResponse,
    Unknown,
}

/// Errors surfaced by an assistant query
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("{0}")]
    Validation(String),
    #[error("agent proxy failed: {0}")]
    Proxy(#[from] AgentError),
    #[error(transparent)]
    Storage(#[from] DbError),
}
