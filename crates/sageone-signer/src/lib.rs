//! Request signing for the Sage One API.
//!
//! Sage One authenticates each API call with an HMAC-SHA1 signature over a
//! canonical form of the request, carried in the `X-Signature` header next to
//! the nonce it was computed with. This crate builds that canonical form,
//! computes the signature and assembles the headers. It performs no network
//! I/O; attach the headers with whatever HTTP client you use.
//!
//! # Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use sageone_signer::SigningRequest;
//!
//! let signed = SigningRequest::builder()
//!     .request_method("post")
//!     .url("https://api.example.com/resource?x=1")
//!     .body_params(BTreeMap::from([("y".to_owned(), "2".to_owned())]))
//!     .nonce("abc123")
//!     .signing_secret("S")
//!     .access_token("T")
//!     .build()
//!     .sign()
//!     .unwrap();
//!
//! assert_eq!(signed.parameter_string(), "x=1&y=2");
//! let headers = signed.request_headers("MyAgent/1.0");
//! assert_eq!(headers.get("Authorization"), Some("Bearer T"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Base URL and parameter string construction
//! - [`config`] - Credentials and user agent loaded from the environment
//! - [`encoding`] - The percent-encoding rule shared by every step
//! - [`error`] - Signing error types
//! - [`headers`] - The six authentication headers
//! - [`nonce`] - Injectable nonce sources
//! - [`request`] - Signing requests and their signed form
//! - [`signature`] - Signature base string, signing key and HMAC-SHA1

pub mod canonical;
pub mod config;
pub mod encoding;
pub mod error;
pub mod headers;
pub mod nonce;
pub mod request;
pub mod signature;

pub use config::SignerConfig;
pub use error::{SignerError, SignerResult};
pub use headers::RequestHeaders;
pub use nonce::{FixedNonceSource, NonceSource, ThreadRngNonceSource};
pub use request::{SignedRequest, SigningRequest};
