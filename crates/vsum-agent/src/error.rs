//! Agent error types.
//!
//! Every variant describes a failed model call. The orchestration core catches
//! these at each call site and degrades instead of propagating.

use thiserror::Error;

pub type AgentResult<T> = Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model request failed: {0}")]
    Transport(String),

    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Model call timed out after {0} seconds")]
    Timeout(u64),

    #[error("Model call cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    pub fn quota_exceeded(msg: impl Into<String>) -> Self {
        Self::QuotaExceeded(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether trying the next model or a later attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Transport(_) | AgentError::EmptyResponse | AgentError::Timeout(_) => true,
            AgentError::Api { status, .. } => *status >= 500 || *status == 404,
            AgentError::QuotaExceeded(_) => true,
            AgentError::Cancelled | AgentError::Config(_) => false,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, AgentError::QuotaExceeded(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Transport(_) => "transport",
            AgentError::Api { .. } => "api",
            AgentError::QuotaExceeded(_) => "quota",
            AgentError::EmptyResponse => "empty",
            AgentError::Timeout(_) => "timeout",
            AgentError::Cancelled => "cancelled",
            AgentError::Config(_) => "config",
        }
    }
}
