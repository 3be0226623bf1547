//! Errors surfaced by the command facade.

use crate::params::ParameterError;
use crate::transport::{self, ErrorKind};

/// Everything a [`Pavlok`](crate::device::Pavlok) operation can fail with.
///
/// `E` is the transport's error type. Transport errors are passed through
/// unchanged and never retried.
#[derive(PartialEq, Clone, Debug, thiserror::Error)]
pub enum Error<E> {
    /// A parameter was out of range. Nothing was written.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
    /// The transport failed or timed out.
    #[error("transport error: {0:?}")]
    Transport(E),
    /// The silent packet was stored but binding the button failed.
    ///
    /// The device's stimulus slot now holds the new settings while the button
    /// still fires its previous assignment.
    #[error("silent packet stored but button not rebound: {0:?}")]
    ButtonNotBound(E),
    /// A read returned bytes that do not decode to the expected value.
    #[error("malformed telemetry")]
    MalformedTelemetry,
    /// The session has not been started, or has been stopped.
    #[error("session not started")]
    NotStarted,
}

impl<E: transport::Error> Error<E> {
    /// Classifies transport failures; `None` for errors raised by this crate.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Transport(e) | Error::ButtonNotBound(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Whether the transport timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind() == Some(ErrorKind::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kind_passes_through() {
        let err: Error<ErrorKind> = Error::Transport(ErrorKind::Timeout);
        assert!(err.is_timeout());
        let err: Error<ErrorKind> = Error::ButtonNotBound(ErrorKind::Failure);
        assert_eq!(err.kind(), Some(ErrorKind::Failure));
    }

    #[test]
    fn test_crate_errors_have_no_kind() {
        let err: Error<ErrorKind> = ParameterError::Count(9).into();
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "invalid parameter: count 9 is outside 0..=7");
    }
}
