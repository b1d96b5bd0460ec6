//! Signing requests and their derived, signed form.
//!
//! A [`SigningRequest`] is the immutable input: method, URL, body parameters,
//! optional nonce and the two credentials. Signing it resolves the nonce once
//! and derives every intermediate value in a single pass into a
//! [`SignedRequest`], which never changes afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::canonical::{CanonicalRequest, QueryParams};
use crate::error::{SignerError, SignerResult};
use crate::headers::RequestHeaders;
use crate::nonce::{NonceSource, ThreadRngNonceSource};
use crate::signature::{
    build_signature_base_string, build_signing_key, compute_signature, verify_signature,
};

/// The inputs of one outgoing API call.
///
/// Built with [`SigningRequest::builder`], or deserialized from a map whose
/// keys must be exactly the field names below (unknown keys are rejected).
///
/// # Examples
///
/// ```
/// use sageone_signer::SigningRequest;
///
/// let signed = SigningRequest::builder()
///     .request_method("get")
///     .url("https://api.example.com/contacts?search=smith")
///     .nonce("abc123")
///     .signing_secret("S")
///     .access_token("T")
///     .build()
///     .sign()
///     .unwrap();
///
/// assert_eq!(signed.request_method(), "GET");
/// assert_eq!(signed.parameter_string(), "search=smith");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize, TypedBuilder)]
#[serde(deny_unknown_fields)]
pub struct SigningRequest {
    /// HTTP method; normalized to uppercase when read.
    #[builder(setter(into))]
    request_method: String,

    /// Absolute target URL, optionally with a query string.
    #[builder(setter(into))]
    url: String,

    /// Form body parameters, merged with the URL's query parameters.
    #[builder(default)]
    #[serde(default)]
    body_params: BTreeMap<String, String>,

    /// Explicit nonce. When absent, one is generated at signing time.
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    nonce: Option<String>,

    /// Signing secret issued to the application.
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    signing_secret: Option<String>,

    /// OAuth access token of the user the call is made for.
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    access_token: Option<String>,
}

impl SigningRequest {
    /// The request method in uppercase.
    #[must_use]
    pub fn request_method(&self) -> String {
        self.request_method.to_uppercase()
    }

    /// The target URL as supplied.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The body parameters as supplied.
    #[must_use]
    pub fn body_params(&self) -> &BTreeMap<String, String> {
        &self.body_params
    }

    /// The explicit nonce, if one was supplied.
    #[must_use]
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Replace the nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Replace both credentials, leaving absent ones unset.
    #[must_use]
    pub(crate) fn with_credentials(
        mut self,
        signing_secret: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        self.signing_secret = signing_secret;
        self.access_token = access_token;
        self
    }

    /// Sign the request, generating a random nonce if none was supplied.
    ///
    /// # Errors
    ///
    /// See [`SigningRequest::sign_with`].
    pub fn sign(&self) -> SignerResult<SignedRequest> {
        self.sign_with(&ThreadRngNonceSource)
    }

    /// Sign the request, taking a missing nonce from `nonce_source`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MalformedUrl`] if the URL is not absolute, or
    /// [`SignerError::MissingCredential`] if the signing secret or access
    /// token is absent or empty.
    pub fn sign_with(&self, nonce_source: &dyn NonceSource) -> SignerResult<SignedRequest> {
        let canonical = CanonicalRequest::parse(&self.url, &self.body_params)?;
        let signing_secret = required(self.signing_secret.as_deref(), "signing_secret")?;
        let access_token = required(self.access_token.as_deref(), "access_token")?;

        let request_method = self.request_method();
        let nonce = self
            .nonce
            .clone()
            .unwrap_or_else(|| nonce_source.generate());

        let signature_base_string = build_signature_base_string(
            &request_method,
            canonical.base_url(),
            canonical.parameter_string(),
            &nonce,
        );
        let signing_key = build_signing_key(signing_secret, access_token);
        let signature = compute_signature(&signing_key, &signature_base_string);

        debug!(
            method = %request_method,
            base_url = %canonical.base_url(),
            parameter_string = %canonical.parameter_string(),
            signature_base_string = %signature_base_string,
            "signed request"
        );

        Ok(SignedRequest {
            request_method,
            canonical,
            nonce,
            signature_base_string,
            signing_key,
            signature,
            access_token: access_token.to_owned(),
        })
    }
}

impl fmt::Debug for SigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningRequest")
            .field("request_method", &self.request_method)
            .field("url", &self.url)
            .field("body_params", &self.body_params)
            .field("nonce", &self.nonce)
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Reject absent and empty credentials.
fn required<'a>(value: Option<&'a str>, name: &'static str) -> SignerResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(SignerError::MissingCredential(name))
}

/// A request with every signing value derived.
///
/// Values are computed once when the request is signed; the nonce in
/// particular is fixed for the lifetime of this value.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    request_method: String,
    canonical: CanonicalRequest,
    nonce: String,
    signature_base_string: String,
    signing_key: String,
    signature: String,
    access_token: String,
}

impl SignedRequest {
    /// The uppercase request method.
    #[must_use]
    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    /// The URL without query, fragment or default port.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.canonical.base_url()
    }

    /// The decoded query parameters of the target URL, as raw bytes.
    #[must_use]
    pub fn url_params(&self) -> &QueryParams {
        self.canonical.url_params()
    }

    /// The sorted, encoded parameter string.
    #[must_use]
    pub fn parameter_string(&self) -> &str {
        self.canonical.parameter_string()
    }

    /// The nonce used for this signature.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// The string that was HMAC-signed.
    #[must_use]
    pub fn signature_base_string(&self) -> &str {
        &self.signature_base_string
    }

    /// The HMAC key (encoded secret and token).
    #[must_use]
    pub fn signing_key(&self) -> &str {
        &self.signing_key
    }

    /// The Base64 signature, including its trailing `\n`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Build the headers for this request.
    #[must_use]
    pub fn request_headers(&self, user_agent: &str) -> RequestHeaders {
        RequestHeaders::new(&self.signature, &self.nonce, &self.access_token, user_agent)
    }

    /// Check a received signature against this request's signature.
    #[must_use]
    pub fn verify(&self, provided_signature: &str) -> bool {
        verify_signature(&self.signature, provided_signature)
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("request_method", &self.request_method)
            .field("canonical", &self.canonical)
            .field("nonce", &self.nonce)
            .field("signature_base_string", &self.signature_base_string)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
