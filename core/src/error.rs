//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the store answers 404 for
//! stale ids, which is the most common failure of update and delete. All
//! other non-2xx responses land in `Http`. Both keep the store's `message`
//! field when the error body carried one, so it can be shown verbatim.

use crate::http::TransportError;

/// Errors produced while talking to the todo store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The store returned 404.
    #[error("resource not found")]
    NotFound { message: Option<String> },

    /// The store returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The store-provided `message`, if the error response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
