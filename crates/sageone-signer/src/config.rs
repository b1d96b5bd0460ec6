//! Signer configuration.
//!
//! Provides [`SignerConfig`], holding the credentials and the user agent used
//! for signed calls. Values are loaded from environment variables.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::request::SigningRequest;

/// Default `User-Agent` sent with signed requests.
pub const DEFAULT_USER_AGENT: &str = concat!("sageone-signer/", env!("CARGO_PKG_VERSION"));

/// Credentials and transport identity for signing API calls.
///
/// # Examples
///
/// ```
/// use sageone_signer::config::SignerConfig;
///
/// let config = SignerConfig::builder()
///     .signing_secret(Some("S".into()))
///     .access_token(Some("T".into()))
///     .build();
/// assert_eq!(config.log_level, "info");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct SignerConfig {
    /// Signing secret issued to the application.
    #[builder(default)]
    pub signing_secret: Option<String>,

    /// OAuth access token for the user.
    #[builder(default)]
    pub access_token: Option<String>,

    /// `User-Agent` header value.
    #[builder(default = String::from(DEFAULT_USER_AGENT))]
    pub user_agent: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            signing_secret: None,
            access_token: None,
            user_agent: String::from(DEFAULT_USER_AGENT),
            log_level: String::from("info"),
        }
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl SignerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SAGEONE_SIGNING_SECRET` | *(unset)* |
    /// | `SAGEONE_ACCESS_TOKEN` | *(unset)* |
    /// | `SAGEONE_USER_AGENT` | `sageone-signer/<version>` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Same variables and defaults as [`SignerConfig::from_env`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("SAGEONE_SIGNING_SECRET") {
            config.signing_secret = Some(v);
        }
        if let Some(v) = lookup("SAGEONE_ACCESS_TOKEN") {
            config.access_token = Some(v);
        }
        if let Some(v) = lookup("SAGEONE_USER_AGENT") {
            config.user_agent = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Start a [`SigningRequest`] carrying this configuration's credentials.
    ///
    /// Missing credentials are left unset and reported when the request is
    /// signed.
    #[must_use]
    pub fn request(
        &self,
        request_method: &str,
        url: &str,
        body_params: BTreeMap<String, String>,
    ) -> SigningRequest {
        SigningRequest::builder()
            .request_method(request_method)
            .url(url)
            .body_params(body_params)
            .build()
            .with_credentials(self.signing_secret.clone(), self.access_token.clone())
    }
}
