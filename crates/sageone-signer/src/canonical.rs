//! Request canonicalization.
//!
//! Turns the target URL and body parameters into the two stable textual pieces
//! the signature is computed over:
//!
//! ```text
//! base_url         = scheme "://" host [":" port] path
//! parameter_string = key=value *( "&" key=value )
//! ```
//!
//! The port is omitted when it is the scheme's default, the query string and
//! fragment are dropped from the base URL, and the parameters are the query
//! parameters merged with the body parameters (body wins on a shared key),
//! sorted by key and encoded with [`percent_encode`].
//!
//! [`percent_encode`]: crate::encoding::percent_encode

use std::collections::BTreeMap;

use http::Uri;

use crate::encoding::{form_decode, percent_encode_bytes};
use crate::error::{SignerError, SignerResult};

/// Decoded query parameters as raw bytes.
///
/// Query escapes may decode to bytes that are not UTF-8 (`%FF`); they are kept
/// verbatim so the parameter string re-encodes them unchanged.
pub type QueryParams = BTreeMap<Vec<u8>, Vec<u8>>;

/// The canonical form of a request target: base URL plus parameters.
///
/// All values are derived once in [`CanonicalRequest::parse`] and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    base_url: String,
    url_params: QueryParams,
    parameter_string: String,
}

impl CanonicalRequest {
    /// Canonicalize a target URL and its body parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MalformedUrl`] if `url` is not an absolute URL
    /// with both a scheme and a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use sageone_signer::canonical::CanonicalRequest;
    ///
    /// let body = BTreeMap::from([("y".to_owned(), "2".to_owned())]);
    /// let canonical = CanonicalRequest::parse("https://api.example.com/resource?x=1", &body).unwrap();
    /// assert_eq!(canonical.base_url(), "https://api.example.com/resource");
    /// assert_eq!(canonical.parameter_string(), "x=1&y=2");
    /// ```
    pub fn parse(url: &str, body_params: &BTreeMap<String, String>) -> SignerResult<Self> {
        let uri = parse_absolute_url(url)?;
        let base_url = build_base_url(&uri, has_explicit_path(url));
        let url_params = parse_query_params(uri.query().unwrap_or(""));
        let parameter_string = build_parameter_string(&url_params, body_params);

        Ok(Self {
            base_url,
            url_params,
            parameter_string,
        })
    }

    /// The URL without query string and fragment, default port omitted.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The decoded query parameters of the target URL.
    #[must_use]
    pub fn url_params(&self) -> &QueryParams {
        &self.url_params
    }

    /// The sorted, encoded `key=value&...` string of all parameters.
    #[must_use]
    pub fn parameter_string(&self) -> &str {
        &self.parameter_string
    }
}

/// Parse `url`, requiring a scheme and a host.
fn parse_absolute_url(url: &str) -> SignerResult<Uri> {
    let malformed = |reason: &str| SignerError::MalformedUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    };

    let uri: Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| malformed(&e.to_string()))?;

    if uri.scheme_str().is_none() {
        return Err(malformed("missing scheme"));
    }
    if uri.host().is_none_or(str::is_empty) {
        return Err(malformed("missing host"));
    }

    Ok(uri)
}

/// Default port for the schemes whose default is elided from the base URL.
fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Whether the raw URL spells out a path after its authority.
///
/// `http::Uri` reports `/` for `https://host` and `https://host?x=1`; the base
/// URL of those keeps an empty path.
fn has_explicit_path(url: &str) -> bool {
    let Some((_, rest)) = url.split_once("://") else {
        return false;
    };
    rest.find(['/', '?', '#'])
        .is_some_and(|idx| rest[idx..].starts_with('/'))
}

/// Build `scheme://host[:port]path` from a parsed absolute URI.
fn build_base_url(uri: &Uri, explicit_path: bool) -> String {
    let scheme = uri.scheme_str().unwrap_or_default();
    let host = uri.host().unwrap_or_default();

    let port = match uri.port_u16() {
        Some(port) if default_port(scheme) != Some(port) => format!(":{port}"),
        _ => String::new(),
    };

    let path = if explicit_path { uri.path() } else { "" };

    format!("{scheme}://{host}{port}{path}")
}

/// Decode a `application/x-www-form-urlencoded` query string into a map.
///
/// `+` decodes to a space and `%XX` sequences are unescaped. When a key
/// repeats, the last occurrence wins. A pair without `=` has an empty value.
#[must_use]
pub fn parse_query_params(query: &str) -> QueryParams {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(key), form_decode(value))
        })
        .collect()
}

/// Merge query and body parameters and render the parameter string.
///
/// Body parameters override query parameters with the same key. Entries are
/// ordered by key (byte-wise) and each key and value is encoded with
/// [`percent_encode_bytes`], which is form encoding with spaces written as
/// `%20` rather than `+`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sageone_signer::canonical::build_parameter_string;
///
/// let query = BTreeMap::from([(b"a".to_vec(), b"1".to_vec())]);
/// let body = BTreeMap::from([("a".to_owned(), "2".to_owned()), ("b".to_owned(), "x y".to_owned())]);
/// assert_eq!(build_parameter_string(&query, &body), "a=2&b=x%20y");
/// ```
#[must_use]
pub fn build_parameter_string(
    url_params: &QueryParams,
    body_params: &BTreeMap<String, String>,
) -> String {
    let mut merged = url_params.clone();
    merged.extend(
        body_params
            .iter()
            .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec())),
    );

    merged
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode_bytes(k), percent_encode_bytes(v)))
        .collect::<Vec<_>>()
        .join("&")
}
