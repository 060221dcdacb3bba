//! Error types for editor-session.

use thiserror::Error;

use crate::session::SessionState;

/// Main error type for all session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Empty transport message (no tag byte).
    #[error("Malformed frame: {0}")]
    MalformedFrame(&'static str),

    /// A cursor read needed more bytes than remain in the payload.
    #[error("Truncated payload: needed {needed} bytes, {remaining} remaining")]
    TruncatedPayload { needed: usize, remaining: usize },

    /// A string field is not valid UTF-8.
    #[error("Invalid encoding: string field is not valid UTF-8")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// Tag is not valid for the current state or direction.
    #[error("Unexpected tag {tag} while {state:?}")]
    UnexpectedTag { tag: u8, state: SessionState },

    /// Entry whose parent path matches no known directory.
    #[error("Orphan entry {path:?}: no directory {parent:?}")]
    OrphanEntry { path: String, parent: String },

    /// Two entries share the exact same path.
    #[error("Duplicate path {0:?}")]
    DuplicatePath(String),

    /// WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON error while rendering a view document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint could not be derived from the page URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Client built without a session token.
    #[error("No session token")]
    MissingToken,

    /// A length-prefixed field does not fit the `u32` prefix.
    #[error("Field too long: {0} bytes")]
    FieldTooLong(usize),

    /// Connection closed.
    #[error("Connection closed")]
    ConnectionClosed,
}

impl SessionError {
    /// Errors confined to a single frame: logged and dropped at the dispatch
    /// boundary, never terminating the session.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            SessionError::MalformedFrame(_)
                | SessionError::TruncatedPayload { .. }
                | SessionError::InvalidEncoding(_)
                | SessionError::UnexpectedTag { .. }
                | SessionError::OrphanEntry { .. }
                | SessionError::DuplicatePath(_)
        )
    }
}

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;
