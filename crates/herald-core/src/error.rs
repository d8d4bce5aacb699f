//! Handler error types.

use thiserror::Error;

/// Errors a handler can return while processing an event.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler refused the event.
    #[error("event rejected: {0}")]
    Rejected(String),

    /// The handler failed with an underlying error.
    #[error("handler failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Build a [`HandlerError::Rejected`] from a message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Wrap an arbitrary error as [`HandlerError::Failed`].
    #[must_use]
    pub fn failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed(Box::new(error))
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(error: std::io::Error) -> Self {
        Self::failed(error)
    }
}

/// Result type returned by event handlers.
pub type HandlerResult = Result<(), HandlerError>;
