//! Header assembly tests.

#[cfg(test)]
mod tests {
    use sageone_signer::SignerConfig;

    use crate::{fixed_request, params};

    #[test]
    fn test_should_return_exactly_six_headers() {
        let signed = fixed_request("post", "https://api.example.com/resource?x=1", &[("y", "2")])
            .sign()
            .unwrap();
        let headers = signed.request_headers("MyAgent/1.0");

        let collected: Vec<(&str, String)> = headers.into_iter().collect();
        assert_eq!(
            collected,
            vec![
                ("Authorization", "Bearer T".to_owned()),
                ("X-Nonce", "abc123".to_owned()),
                ("X-Signature", "umtqdsB24eTldBp8EeuI0sAfTnU=\n".to_owned()),
                ("Accept", "*/*".to_owned()),
                (
                    "Content-Type",
                    "application/x-www-form-urlencoded".to_owned()
                ),
                ("User-Agent", "MyAgent/1.0".to_owned()),
            ]
        );
    }

    #[test]
    fn test_should_convert_to_http_header_map() {
        let signed = fixed_request("get", "https://api.example.com/r", &[])
            .sign()
            .unwrap();
        let map = signed
            .request_headers("MyAgent/1.0")
            .to_header_map()
            .unwrap();

        assert_eq!(map.len(), 6);
        assert_eq!(map[http::header::ACCEPT], "*/*");
        assert_eq!(map["x-nonce"], "abc123");
        assert_eq!(
            map["x-signature"].to_str().unwrap(),
            signed.signature().trim_end()
        );

        let request = http::Request::builder()
            .method(signed.request_method())
            .uri("https://api.example.com/r");
        let request = map
            .iter()
            .fold(request, |req, (name, value)| req.header(name, value))
            .body(())
            .unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer T");
    }

    #[test]
    fn test_should_serialize_headers_as_json_object() {
        let signed = fixed_request("get", "https://api.example.com/r", &[])
            .sign()
            .unwrap();
        let json = serde_json::to_value(signed.request_headers("MyAgent/1.0")).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert_eq!(object["User-Agent"], "MyAgent/1.0");
    }

    #[test]
    fn test_should_sign_with_configured_credentials() {
        let config = SignerConfig::builder()
            .signing_secret(Some("S".into()))
            .access_token(Some("T".into()))
            .user_agent("MyAgent/1.0".into())
            .build();

        let signed = config
            .request(
                "post",
                "https://api.example.com/resource?x=1",
                params(&[("y", "2")]),
            )
            .with_nonce("abc123")
            .sign()
            .unwrap();
        let headers = signed.request_headers(&config.user_agent);

        assert_eq!(
            headers.get("X-Signature"),
            Some("umtqdsB24eTldBp8EeuI0sAfTnU=\n")
        );
        assert_eq!(headers.get("User-Agent"), Some("MyAgent/1.0"));
    }
}
