//! Unified error types for lmu-races.
//!
//! Display strings carry a stable code prefix so log lines and MCP error
//! messages stay greppable.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the race scraper and its query surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// The race list container is missing from the page.
    #[error("CONTAINER_NOT_FOUND: {0}")]
    ContainerNotFound(String),

    /// The operation was cancelled before it completed.
    #[error("CANCELLED")]
    Cancelled,

    /// A response could not be serialized.
    #[error("SERIALIZE_FAILED: {0}")]
    SerializeFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::ContainerNotFound(msg) => (-32000, msg.clone()),
            Error::Cancelled => (-32013, "Operation cancelled".to_string()),
            Error::SerializeFailed(msg) => (-32603, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
