use std::time::Duration;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The base URI could not be parsed into an HTTP(S) URL.
    ///
    /// The offending URI is not echoed back since it may carry a password.
    #[error("malformed uri: {reason}")]
    MalformedUri { reason: String },
    /// The service could not be reached within the retry budget.
    #[error("connection failed after {attempts} attempt(s): {last}")]
    Connection {
        /// Number of probe requests that were sent.
        attempts: usize,
        /// The last failure observed before giving up.
        #[source]
        last: FailureCause,
    },
    /// The service rejected the supplied credentials.
    #[error("authentication rejected with http {status}: {body}")]
    Authentication { status: u16, body: String },
    /// The service answered, but not as a compatible graph database.
    #[error("incompatible server: {0}")]
    IncompatibleServer(String),
}

impl ConnectError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedUri {
            reason: reason.into(),
        }
    }

    /// Number of probe requests sent before this error, when known.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            Self::Connection { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

/// Underlying cause carried by [`ConnectError::Connection`].
#[derive(Debug, thiserror::Error)]
pub enum FailureCause {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Retryable HTTP status with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// The overall bootstrap deadline ran out.
    #[error("deadline of {0:?} elapsed")]
    DeadlineElapsed(Duration),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{ConnectError, FailureCause};

    #[test]
    fn connection_error_exposes_cause_and_attempts() {
        let err = ConnectError::Connection {
            attempts: 3,
            last: FailureCause::Http {
                status: 503,
                body: "busy".to_owned(),
            },
        };

        assert_eq!(err.attempts(), Some(3));
        assert_eq!(
            err.to_string(),
            "connection failed after 3 attempt(s): http error 503: busy"
        );
        let source = err.source().expect("connection error must carry a source");
        assert_eq!(source.to_string(), "http error 503: busy");
    }

    #[test]
    fn terminal_errors_have_no_attempt_count() {
        assert_eq!(ConnectError::malformed("no host").attempts(), None);
        assert_eq!(
            ConnectError::IncompatibleServer("no version".to_owned()).attempts(),
            None
        );
    }
}
