//! Client error types

use thiserror::Error;

/// Client error type
///
/// Every command and fetch boundary converts one of these into a
/// user-visible message; nothing escapes to a global handler and nothing is
/// retried automatically. Local no-op guards (an empty message draft) are
/// not errors, they are [`crate::commands::Submission::Skipped`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure before a usable response arrived
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; the message is the server's `error` field or the
    /// generic fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A capability-gated control was invoked while its flag was false;
    /// nothing was sent
    #[error("the {0} control is disabled")]
    ControlDisabled(&'static str),

    /// Local draft coercion failed (non-numeric text in a numeric field)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A 2xx payload that does not match the expected shape
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message to surface to the user, verbatim.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
