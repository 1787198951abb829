//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CareHubError`]
//! via `From`. The neutral facade operations swallow these after logging; the
//! `try_*` operations hand them to the caller.

/// Base error type for every carehub operation.
#[derive(Debug, thiserror::Error)]
pub enum CareHubError {
    /// Input rejected before any request was issued.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The backend answered with `success: false`.
    #[error("request rejected by backend")]
    Rejected(#[from] RejectedError),

    /// A record returned by the backend could not be decoded.
    #[error("failed to decode record")]
    Decode(#[from] serde_json::Error),

    /// The backend could not be reached or failed unexpectedly.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CareHubError {
    /// Message suitable for a user-facing notification, when the failure
    /// carries one from the backend.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(err) => Some(err.message.as_str()),
            _ => None,
        }
    }
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The identifier could not be coerced to an integer.
    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    /// The backend client cannot be built without this credential.
    #[error("missing client credential: {0}")]
    MissingCredential(&'static str),
}

/// A lookup returned no record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{table} record {id} not found")]
pub struct NotFoundError {
    pub table: &'static str,
    pub id: String,
}

/// The backend reported an unsuccessful response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RejectedError {
    pub message: String,
}

impl RejectedError {
    /// Build from the optional message of a response envelope.
    #[must_use]
    pub fn from_message(message: Option<String>) -> Self {
        Self {
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }
}
