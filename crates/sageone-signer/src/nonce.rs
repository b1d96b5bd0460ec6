//! Nonce sources.
//!
//! A nonce is generated once per signed request. The randomness is injected
//! through [`NonceSource`] so tests can pin the value.

/// Number of random bytes in a generated nonce (32 hex characters).
pub const NONCE_BYTES: usize = 16;

/// A source of nonces for requests that do not carry one.
pub trait NonceSource: Send + Sync {
    /// Produce a fresh nonce.
    fn generate(&self) -> String;
}

/// Hex-encoded random nonces from the thread-local CSPRNG.
///
/// # Examples
///
/// ```
/// use sageone_signer::nonce::{NonceSource, ThreadRngNonceSource};
///
/// let nonce = ThreadRngNonceSource.generate();
/// assert_eq!(nonce.len(), 32);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNonceSource;

impl NonceSource for ThreadRngNonceSource {
    fn generate(&self) -> String {
        let buf: [u8; NONCE_BYTES] = rand::random();
        hex::encode(buf)
    }
}

/// Always yields the same nonce. Intended for tests and request replays.
#[derive(Debug, Clone)]
pub struct FixedNonceSource(String);

impl FixedNonceSource {
    /// Create a source that always returns `nonce`.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl NonceSource for FixedNonceSource {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
