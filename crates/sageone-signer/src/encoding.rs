//! Percent-encoding used throughout the signing scheme.
//!
//! Every byte is escaped as `%XX` (uppercase hex) except ASCII letters, digits
//! and the four unreserved marks `-`, `.`, `_`, `~`. This is stricter than the
//! usual URL component encoding: `&`, `=`, `+`, `%`, `/`, `:` and space are all
//! escaped, and non-ASCII characters are escaped byte by byte in their UTF-8
//! form.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters that are escaped by [`percent_encode`].
const SIGNING_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string with the signing scheme's encoding rule.
///
/// # Examples
///
/// ```
/// use sageone_signer::encoding::percent_encode;
///
/// assert_eq!(percent_encode("a&b=c"), "a%26b%3Dc");
/// assert_eq!(percent_encode("a-b._~"), "a-b._~");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, SIGNING_ENCODE_SET).to_string()
}

/// Percent-encode raw bytes with the same rule as [`percent_encode`].
///
/// Used for decoded query values, which need not be valid UTF-8.
#[must_use]
pub fn percent_encode_bytes(input: &[u8]) -> String {
    percent_encoding::percent_encode(input, SIGNING_ENCODE_SET).to_string()
}

/// Decode one `application/x-www-form-urlencoded` component to raw bytes.
///
/// `+` becomes a space and `%XX` escapes are unescaped. Bytes that do not form
/// valid UTF-8 are kept as they are.
#[must_use]
pub fn form_decode(input: &str) -> Vec<u8> {
    percent_decode_str(&input.replace('+', " ")).collect()
}
