//! Crate-wide error type. Every failure a caller can observe is one of these
//! variants, and each carries a short human-readable message. Transport and
//! backend failures are normalized here so call sites never see a raw
//! `reqwest::Error`.

use thiserror::Error;

/// Result type returned by every backend-facing operation.
pub type NormalizedResult<T = serde_json::Value> = Result<T, AppError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    /// No response was obtained (offline, DNS, connection refused).
    #[error("Network error: {message}")]
    Transport { message: String },
    #[error("Timeout: {0}")]
    Timeout(String),
    /// The backend answered with a failure status or an explicit `success: false`.
    #[error("Request failed ({status}): {message}")]
    Backend { status: u16, message: String },
    /// A session-dependent action was attempted without a valid token.
    #[error("Session error: {0}")]
    Session(String),
    #[error("Login failed: {message}")]
    Auth {
        message: String,
        status: Option<u16>,
    },
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// The human-readable part of the failure, without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Backend { message, .. }
            | Self::Auth { message, .. } => message,
            Self::Timeout(message)
            | Self::Session(message)
            | Self::Input(message)
            | Self::Parse(message)
            | Self::Serialization(message)
            | Self::Storage(message)
            | Self::Config(message) => message,
        }
    }

    /// The HTTP status code when the failure came from a backend response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Auth { status, .. } => *status,
            _ => None,
        }
    }

    /// True when no response was received at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout(_))
    }

    /// True when the caller should send the user back to the login flow.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
