//! Failure classification and backoff for the connectivity probe.

use std::{error::Error as StdError, time::Duration};

use reqwest::StatusCode;

use crate::ConnectOptions;

/// How the retry loop treats a failed probe.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    /// Likely to succeed on another attempt.
    Transient,
    /// The service rejected the credentials.
    Authentication,
    /// The service answered, but not as a compatible graph database.
    Incompatible,
    /// A local or protocol failure that will recur on every attempt.
    Fatal,
}

impl FailureClass {
    pub fn is_transient(self) -> bool {
        self == Self::Transient
    }
}

/// Classifies a non-success HTTP status.
pub fn classify_status(status: StatusCode) -> FailureClass {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureClass::Authentication,
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS
        | StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => FailureClass::Transient,
        _ => FailureClass::Incompatible,
    }
}

/// Classifies an error raised by the HTTP client before a status arrived.
///
/// A peer that does not speak HTTP (e.g. a Bolt port) surfaces as a request
/// error too, so the cause chain is checked before the coarse kinds.
pub fn classify_transport(err: &reqwest::Error) -> FailureClass {
    if err.is_timeout() {
        FailureClass::Transient
    } else if is_malformed_response(err) {
        FailureClass::Incompatible
    } else if is_certificate_rejection(err) {
        FailureClass::Fatal
    } else if err.is_connect() || err.is_request() || err.is_body() {
        FailureClass::Transient
    } else {
        FailureClass::Fatal
    }
}

/// Yields `err` and every error below it, looking inside `io::Error`
/// wrappers whose payload `source()` skips.
fn causes<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |cause: &&'a (dyn StdError + 'static)| (*cause).source()).flat_map(|cause| {
        let inner = cause
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::get_ref)
            .map(|inner| inner as &(dyn StdError + 'static));
        std::iter::once(cause).chain(inner)
    })
}

/// True when the peer answered with bytes hyper could not parse as HTTP.
pub fn is_malformed_response(err: &(dyn StdError + 'static)) -> bool {
    causes(err).any(|cause| {
        cause
            .downcast_ref::<hyper::Error>()
            .is_some_and(hyper::Error::is_parse)
    })
}

/// True when TLS failed because the server certificate was not trusted.
///
/// Retrying cannot help; the caller has to supply a client that trusts the
/// certificate, see [`crate::with_http_client`].
pub fn is_certificate_rejection(err: &(dyn StdError + 'static)) -> bool {
    causes(err).any(|cause| {
        matches!(
            cause.downcast_ref::<rustls::Error>(),
            Some(rustls::Error::InvalidCertificate(_))
        )
    })
}

/// Delay before retrying after the failed attempt `attempt` (0-based).
///
/// Doubles from `retry_backoff_ms` and saturates at `max_backoff_ms`, so the
/// sequence is monotonically non-decreasing and bounded.
pub fn backoff_delay(options: &ConnectOptions, attempt: usize) -> Duration {
    let exp = attempt.min(16) as u32;
    let multiplier = 1u64 << exp;
    let delay_ms = options
        .retry_backoff_ms
        .saturating_mul(multiplier)
        .min(options.max_backoff_ms.max(options.retry_backoff_ms));
    Duration::from_millis(delay_ms)
}
