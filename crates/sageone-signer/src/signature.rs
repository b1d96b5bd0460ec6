//! Signature computation (HMAC-SHA1).
//!
//! ```text
//! SignatureBaseString = METHOD "&" enc(base_url) "&" enc(parameter_string) "&" enc(nonce)
//! SigningKey          = enc(signing_secret) "&" enc(access_token)
//! Signature           = Base64(HMAC-SHA1(SigningKey, SignatureBaseString)) "\n"
//! ```
//!
//! where `enc` is [`percent_encode`]. The signature keeps the line terminator
//! that line-wrapped Base64 output ends with, so it is byte-identical to what
//! the API server and existing clients produce.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::encoding::percent_encode;

type HmacSha1 = Hmac<Sha1>;

/// Line terminator appended to the Base64 signature.
pub const SIGNATURE_TERMINATOR: char = '\n';

/// Build the signature base string.
///
/// `method` is used as given; callers pass the uppercase request method.
///
/// # Examples
///
/// ```
/// use sageone_signer::signature::build_signature_base_string;
///
/// let base = build_signature_base_string("POST", "https://api.example.com/resource", "x=1&y=2", "abc123");
/// assert_eq!(base, "POST&https%3A%2F%2Fapi.example.com%2Fresource&x%3D1%26y%3D2&abc123");
/// ```
#[must_use]
pub fn build_signature_base_string(
    method: &str,
    base_url: &str,
    parameter_string: &str,
    nonce: &str,
) -> String {
    [
        method.to_owned(),
        percent_encode(base_url),
        percent_encode(parameter_string),
        percent_encode(nonce),
    ]
    .join("&")
}

/// Build the HMAC key from the signing secret and access token.
#[must_use]
pub fn build_signing_key(signing_secret: &str, access_token: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(signing_secret),
        percent_encode(access_token)
    )
}

/// Compute `Base64(HMAC-SHA1(signing_key, base_string))` followed by `\n`.
#[must_use]
pub fn compute_signature(signing_key: &str, base_string: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(base_string.as_bytes());
    let result = mac.finalize().into_bytes();

    let mut signature = BASE64.encode(result);
    signature.push(SIGNATURE_TERMINATOR);
    signature
}

/// Compare a provided signature against the expected one in constant time.
///
/// Surrounding whitespace is ignored on both sides, so a signature whose line
/// terminator was stripped in transit (for example by an HTTP header parser)
/// still verifies.
#[must_use]
pub fn verify_signature(expected: &str, provided: &str) -> bool {
    let expected = expected.trim();
    let provided = provided.trim();

    if expected.as_bytes().ct_eq(provided.as_bytes()).into() {
        true
    } else {
        debug!(provided = %provided, "signature mismatch");
        false
    }
}
