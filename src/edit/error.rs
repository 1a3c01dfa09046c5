//! Edit-session error types.

use thiserror::Error;

use super::protocol::codes;

/// Result type for edit-session operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors raised by the session validation and resolution pipeline.
///
/// All variants are expected, locally detected conditions. They are
/// converted into structured error responses by the service, never allowed
/// to escape as panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A request parameter was missing or malformed.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Wire name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// No edit session is registered under the owner URI.
    #[error("no edit session found for '{0}'")]
    SessionNotFound(String),

    /// The session exists but has no table metadata attached yet.
    #[error("edit session '{0}' is not initialized")]
    SessionNotInitialized(String),

    /// Metadata was attached to a session that already had it.
    #[error("edit session '{0}' is already initialized")]
    SessionAlreadyInitialized(String),
}

impl EditError {
    /// Shorthand for a missing or empty `ownerUri` parameter.
    pub fn missing_owner_uri() -> Self {
        Self::InvalidParameter {
            name: "ownerUri",
            reason: "must be a non-empty string".to_string(),
        }
    }

    /// Stable numeric code for the wire error path.
    pub fn code(&self) -> i64 {
        match self {
            Self::InvalidParameter { .. } => codes::INVALID_PARAMS,
            Self::SessionNotFound(_) => codes::SESSION_NOT_FOUND,
            Self::SessionNotInitialized(_) => codes::SESSION_NOT_INITIALIZED,
            Self::SessionAlreadyInitialized(_) => codes::SESSION_ALREADY_INITIALIZED,
        }
    }

    /// Structured diagnostic payload, when the variant carries one.
    pub fn diagnostic(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidParameter { name, .. } => {
                Some(serde_json::json!({ "parameter": name }))
            }
            Self::SessionNotFound(uri)
            | Self::SessionNotInitialized(uri)
            | Self::SessionAlreadyInitialized(uri) => {
                Some(serde_json::json!({ "ownerUri": uri }))
            }
        }
    }
}
