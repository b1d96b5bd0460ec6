//! Error types for request signing.
//!
//! Every failure is surfaced synchronously as a [`SignerError`]; a request that
//! fails to sign never yields a partially-populated header set.

/// Errors that can occur while canonicalizing or signing a request.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The target URL is not an absolute URL with a scheme and host.
    #[error("malformed URL {url:?}: {reason}")]
    MalformedUrl {
        /// The URL as supplied by the caller.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The signing secret or access token is absent or empty.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// A header value cannot be represented as an HTTP header value.
    #[error("invalid value for header {name}: {reason}")]
    InvalidHeaderValue {
        /// The header name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Convenience result type for signing operations.
pub type SignerResult<T> = Result<T, SignerError>;
