use std::error::Error;

use thiserror::Error;

use crate::event::MessageKey;

/// Failure reported by the messaging transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target message no longer exists or can no longer be edited.
    #[error("target message not found")]
    NotFound,
    /// Any other send/edit/delete failure.
    #[error("transport request failed")]
    Unavailable(#[source] Box<dyn Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary transport-side failure.
    pub fn unavailable(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Unavailable(source.into())
    }
}

/// Errors produced by the chooser.
#[derive(Debug, Error)]
pub enum ChooserError {
    /// Lookup against a message with no active session.
    ///
    /// The router swallows this; stale and duplicate taps are expected.
    #[error("no active selection for message {0}")]
    SessionNotFound(MessageKey),
    /// Typed page number failed to parse or was out of range.
    #[error("invalid page number input: {0:?}")]
    InvalidPageInput(String),
    #[error(transparent)]
    TransportUnavailable(#[from] TransportError),
    /// Construction-time configuration was rejected.
    #[error("invalid chooser configuration: {0}")]
    Configuration(String),
    /// A caller-supplied choose/cancel handler failed.
    #[error("selection handler failed")]
    Handler(#[source] Box<dyn Error + Send + Sync>),
}

impl ChooserError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
