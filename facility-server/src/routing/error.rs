//! Routing provider error types.

/// Errors from routing/geocoding provider operations.
///
/// This is a deliberately small, closed set: callers log the outcome and
/// render "unavailable", and tests assert on the specific variant. Quota,
/// auth, transport, and malformed-response failures all collapse into
/// [`RouteError::Provider`] because no caller can act differently on the
/// distinction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The provider returned no result (unknown address, no route).
    #[error("no result found")]
    NotFound,

    /// The provider or transport failed.
    #[error("provider error: {0}")]
    Provider(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
}
