//! Dispatch error types.

use herald_core::{EventKind, HandlerError};
use thiserror::Error;

/// A fault surfaced to the caller that owned a drain.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler returned an error.
    #[error("handler '{handler}' failed on {kind}: {source}")]
    HandlerFailed {
        /// Name of the faulting handler.
        handler: String,
        /// Kind of the event being delivered.
        kind: &'static EventKind,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },

    /// A handler panicked. The panic was caught and the gate released.
    #[error("handler '{handler}' panicked on {kind}: {message}")]
    HandlerPanicked {
        /// Name of the faulting handler.
        handler: String,
        /// Kind of the event being delivered.
        kind: &'static EventKind,
        /// Panic payload, if it was a string.
        message: String,
    },

    /// Faults collected under [`FaultPolicy::Isolate`](crate::FaultPolicy::Isolate).
    #[error("{} handler fault(s) during drain", .faults.len())]
    Isolated {
        /// Every fault, in delivery order.
        faults: Vec<DispatchError>,
    },
}

impl DispatchError {
    /// Name of the faulting handler, if this is a single fault.
    #[must_use]
    pub fn handler(&self) -> Option<&str> {
        match self {
            Self::HandlerFailed { handler, .. } | Self::HandlerPanicked { handler, .. } => {
                Some(handler)
            },
            Self::Isolated { .. } => None,
        }
    }

    /// Kind being delivered when the fault occurred, if this is a single fault.
    #[must_use]
    pub fn kind(&self) -> Option<&'static EventKind> {
        match self {
            Self::HandlerFailed { kind, .. } | Self::HandlerPanicked { kind, .. } => Some(*kind),
            Self::Isolated { .. } => None,
        }
    }

    /// Number of handler faults this error represents.
    #[must_use]
    pub fn fault_count(&self) -> usize {
        match self {
            Self::Isolated { faults } => faults.len(),
            Self::HandlerFailed { .. } | Self::HandlerPanicked { .. } => 1,
        }
    }
}

/// Lets a handler propagate a nested dispatch failure with `?`.
impl From<DispatchError> for HandlerError {
    fn from(error: DispatchError) -> Self {
        Self::failed(error)
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T = ()> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::TICK;

    #[test]
    fn test_failed_display_names_handler_and_kind() {
        let err = DispatchError::HandlerFailed {
            handler: "printer".into(),
            kind: &TICK,
            source: HandlerError::rejected("closed"),
        };
        let text = err.to_string();
        assert!(text.contains("printer"));
        assert!(text.contains("Tick"));
        assert!(text.contains("closed"));
        assert_eq!(err.handler(), Some("printer"));
        assert_eq!(err.kind(), Some(&TICK));
    }

    #[test]
    fn test_converts_into_handler_error() {
        let nested = DispatchError::HandlerPanicked {
            handler: "inner".into(),
            kind: &TICK,
            message: "boom".into(),
        };
        let err = HandlerError::from(nested);
        assert!(matches!(err, HandlerError::Failed(_)));
        assert!(err.to_string().contains("inner"));
    }

    #[test]
    fn test_isolated_counts_faults() {
        let fault = || DispatchError::HandlerPanicked {
            handler: "h".into(),
            kind: &TICK,
            message: "boom".into(),
        };
        let err = DispatchError::Isolated {
            faults: vec![fault(), fault()],
        };
        assert_eq!(err.fault_count(), 2);
        assert_eq!(err.to_string(), "2 handler fault(s) during drain");
        assert!(err.handler().is_none());
    }
}
