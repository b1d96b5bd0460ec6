//! End-to-end signing tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use hmac::{Hmac, KeyInit, Mac};
    use sageone_signer::{FixedNonceSource, SignerError, SigningRequest};
    use sha1::Sha1;

    use crate::{fixed_request, params, query};

    fn hmac_sha1_base64(key: &str, message: &str) -> String {
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_should_sign_post_with_query_and_body() {
        let signed = fixed_request("post", "https://api.example.com/resource?x=1", &[("y", "2")])
            .sign()
            .unwrap();

        assert_eq!(signed.request_method(), "POST");
        assert_eq!(signed.base_url(), "https://api.example.com/resource");
        assert_eq!(signed.url_params(), &query(&[("x", "1")]));
        assert_eq!(signed.parameter_string(), "x=1&y=2");
        assert_eq!(
            signed.signature_base_string(),
            "POST&https%3A%2F%2Fapi.example.com%2Fresource&x%3D1%26y%3D2&abc123"
        );
        assert_eq!(signed.signing_key(), "S&T");

        let expected = hmac_sha1_base64(signed.signing_key(), signed.signature_base_string());
        assert_eq!(signed.signature(), format!("{expected}\n"));
    }

    #[test]
    fn test_should_produce_identical_signatures_for_identical_inputs() {
        let a = fixed_request("get", "https://api.example.com/r?b=2&a=1", &[]).sign().unwrap();
        let b = fixed_request("GET", "https://api.example.com/r?a=1&b=2", &[]).sign().unwrap();
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.parameter_string(), "a=1&b=2");
    }

    #[test]
    fn test_should_change_signature_when_any_input_changes() {
        let base = fixed_request("post", "https://api.example.com/r", &[("a", "1")])
            .sign()
            .unwrap();
        let other_body = fixed_request("post", "https://api.example.com/r", &[("a", "2")])
            .sign()
            .unwrap();
        let other_method = fixed_request("put", "https://api.example.com/r", &[("a", "1")])
            .sign()
            .unwrap();
        let other_nonce = fixed_request("post", "https://api.example.com/r", &[("a", "1")])
            .with_nonce("xyz")
            .sign()
            .unwrap();

        assert_ne!(base.signature(), other_body.signature());
        assert_ne!(base.signature(), other_method.signature());
        assert_ne!(base.signature(), other_nonce.signature());
    }

    #[test]
    fn test_should_let_body_override_query_parameter() {
        let signed = fixed_request("put", "https://api.example.com/r?a=1", &[("a", "2")])
            .sign()
            .unwrap();
        assert_eq!(signed.parameter_string(), "a=2");
    }

    #[test]
    fn test_should_encode_spaces_and_reserved_characters() {
        let signed = fixed_request(
            "post",
            "https://api.example.com/r?q=caf%C3%A9+bar",
            &[("contact[name]", "Jane Doe & Co")],
        )
        .sign()
        .unwrap();

        assert_eq!(
            signed.parameter_string(),
            "contact%5Bname%5D=Jane%20Doe%20%26%20Co&q=caf%C3%A9%20bar"
        );
        assert!(
            signed
                .signature_base_string()
                .contains("contact%255Bname%255D%3DJane%2520Doe")
        );
    }

    #[test]
    fn test_should_handle_ports() {
        let default = fixed_request("get", "https://example.com:443/path", &[]).sign().unwrap();
        let custom = fixed_request("get", "https://example.com:8443/path", &[]).sign().unwrap();

        assert_eq!(default.base_url(), "https://example.com/path");
        assert_eq!(custom.base_url(), "https://example.com:8443/path");
        assert_ne!(default.signature(), custom.signature());
    }

    #[test]
    fn test_should_generate_fresh_nonce_per_request() {
        let request = SigningRequest::builder()
            .request_method("get")
            .url("https://api.example.com/r")
            .signing_secret("S")
            .access_token("T")
            .build();

        let first = request.sign().unwrap();
        let second = request.sign().unwrap();

        assert_eq!(first.nonce(), first.nonce());
        assert_ne!(first.nonce(), second.nonce());
        assert_ne!(first.signature(), second.signature());
    }

    #[test]
    fn test_should_sign_reproducibly_with_injected_nonce() {
        let request = SigningRequest::builder()
            .request_method("post")
            .url("https://api.example.com/resource?x=1")
            .body_params(params(&[("y", "2")]))
            .signing_secret("S")
            .access_token("T")
            .build();

        let signed = request.sign_with(&FixedNonceSource::new("abc123")).unwrap();
        assert_eq!(signed.signature(), "umtqdsB24eTldBp8EeuI0sAfTnU=\n");
    }

    #[test]
    fn test_should_surface_errors_before_signing() {
        let malformed = fixed_request("get", "api.example.com/r", &[]).sign();
        assert!(matches!(malformed, Err(SignerError::MalformedUrl { .. })));

        let no_token = SigningRequest::builder()
            .request_method("get")
            .url("https://api.example.com/r")
            .signing_secret("S")
            .build()
            .sign();
        assert!(matches!(
            no_token,
            Err(SignerError::MissingCredential("access_token"))
        ));
    }

    #[test]
    fn test_should_sign_request_loaded_from_json() {
        let request: SigningRequest = serde_json::from_value(serde_json::json!({
            "request_method": "post",
            "url": "https://api.example.com/resource?x=1",
            "body_params": { "y": "2" },
            "nonce": "abc123",
            "signing_secret": "S",
            "access_token": "T",
        }))
        .unwrap();

        let signed = request.sign().unwrap();
        assert!(signed.verify("umtqdsB24eTldBp8EeuI0sAfTnU="));
    }
}
