//! Authentication headers for a signed request.

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{SignerError, SignerResult};
use crate::signature::SIGNATURE_TERMINATOR;

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// Nonce header name.
pub const X_NONCE: &str = "X-Nonce";
/// Signature header name.
pub const X_SIGNATURE: &str = "X-Signature";
/// `Accept` header name.
pub const ACCEPT: &str = "Accept";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `User-Agent` header name.
pub const USER_AGENT: &str = "User-Agent";

/// One header: display name, `http` wire name and value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: &'static str,
    wire_name: HeaderName,
    value: String,
}

impl Entry {
    fn new(name: &'static str, wire_name: HeaderName, value: String) -> Self {
        Self {
            name,
            wire_name,
            value,
        }
    }

    fn into_pair(self) -> (&'static str, String) {
        (self.name, self.value)
    }
}

/// The six headers attached to a signed API call, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: [Entry; 6],
}

impl RequestHeaders {
    /// Assemble the header set. This is pure assembly and cannot fail.
    #[must_use]
    pub fn new(signature: &str, nonce: &str, access_token: &str, user_agent: &str) -> Self {
        Self {
            entries: [
                Entry::new(
                    AUTHORIZATION,
                    http::header::AUTHORIZATION,
                    format!("Bearer {access_token}"),
                ),
                Entry::new(X_NONCE, HeaderName::from_static("x-nonce"), nonce.to_owned()),
                Entry::new(
                    X_SIGNATURE,
                    HeaderName::from_static("x-signature"),
                    signature.to_owned(),
                ),
                Entry::new(ACCEPT, http::header::ACCEPT, "*/*".to_owned()),
                Entry::new(
                    CONTENT_TYPE,
                    http::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded".to_owned(),
                ),
                Entry::new(USER_AGENT, http::header::USER_AGENT, user_agent.to_owned()),
            ],
        }
    }

    /// Look up a header value by its exact (case-sensitive) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|e| (e.name, e.value.as_str()))
    }

    /// Number of headers (always six).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; provided alongside [`RequestHeaders::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into an [`http::HeaderMap`] for use with an HTTP client.
    ///
    /// The signature's trailing line terminator is removed, since header
    /// values cannot contain it.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::InvalidHeaderValue`] if a value contains bytes
    /// not permitted in a header (for example a control character in the user
    /// agent or access token).
    pub fn to_header_map(&self) -> SignerResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            let value = if entry.name == X_SIGNATURE {
                entry.value.trim_end_matches(SIGNATURE_TERMINATOR)
            } else {
                entry.value.as_str()
            };
            let header_value =
                HeaderValue::from_str(value).map_err(|e| SignerError::InvalidHeaderValue {
                    name: entry.name,
                    reason: e.to_string(),
                })?;
            map.insert(entry.wire_name.clone(), header_value);
        }
        Ok(map)
    }
}

impl IntoIterator for RequestHeaders {
    type Item = (&'static str, String);
    type IntoIter = std::array::IntoIter<(&'static str, String), 6>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.map(Entry::into_pair).into_iter()
    }
}

/// Serializes as a JSON-style object of header name to value.
impl Serialize for RequestHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name, &entry.value)?;
        }
        map.end()
    }
}
