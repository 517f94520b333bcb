//! Error types for the PassNinja client.
//!
//! # Design
//! Callers see exactly two kinds of failure. `InvalidArguments` is raised
//! before any network traffic and is always preventable by the caller.
//! `OperationFailed` wraps whatever went wrong on the wire, from a refused
//! connection to a response body that does not have the promised shape.
//!
//! `TransportError` keeps a dedicated `NotFound` variant because callers
//! frequently distinguish "the pass does not exist" from "the server
//! returned an unexpected status."

use thiserror::Error;

/// Failures below the operation layer: the round-trip, the status line, or
/// the body encoding.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by every public `PassClient` operation.
#[derive(Debug, Error)]
pub enum PassNinjaError {
    /// Missing or malformed caller input. No request was sent.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote call, or decoding its response, failed.
    #[error("failed to {action}: {source}")]
    OperationFailed {
        action: &'static str,
        #[source]
        source: TransportError,
    },
}

impl PassNinjaError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PassNinjaError::InvalidArguments(message.into())
    }

    pub(crate) fn failed(action: &'static str, source: TransportError) -> Self {
        PassNinjaError::OperationFailed { action, source }
    }

    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, PassNinjaError::InvalidArguments(_))
    }

    pub fn is_operation_failed(&self) -> bool {
        matches!(self, PassNinjaError::OperationFailed { .. })
    }
}
