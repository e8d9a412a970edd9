//! Error types for the chat client.
//!
//! ERROR HANDLING
//! ==============
//! Transport and parse failures surface as [`ApiError`]; missing view
//! elements as [`ViewError`]. The controller wraps both in [`ChatError`] so
//! callers (poller, CLI) can decide whether a failure is logged, alerted, or
//! ignored. None of these are fatal to the poller.

// =============================================================================
// API
// =============================================================================

/// Errors produced by [`crate::api::ChatApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status. The body is kept as
    /// plain text.
    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },

    /// The success body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// VIEW
// =============================================================================

/// Errors produced by [`crate::view::ChatView`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A required element (`#input-mensaje` or `#mensajes`) is absent.
    #[error("element not found: {0}")]
    MissingElement(&'static str),
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    View(#[from] ViewError),

    /// Operation requires an active conversation.
    #[error("no active conversation")]
    NoConversation,

    /// Operation is reserved for operators (encargados).
    #[error("only operators can close a conversation")]
    NotOperator,
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}
