//! API key transport and request authentication.

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Name used for the shared secret, both as header and as query parameter.
pub const API_KEY_FIELD: &str = "api_key_header_value";

/// Where the API key travels on outgoing requests.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AuthTransport {
    #[default]
    Header,
    Query,
}

/// Attach `api_key` to a request according to `transport`.
///
/// With no key configured the request is returned untouched.
pub fn apply_auth(
    request: RequestBuilder,
    api_key: Option<&str>,
    transport: AuthTransport,
) -> RequestBuilder {
    let Some(key) = api_key else {
        return request;
    };
    match transport {
        AuthTransport::Header => request.header(API_KEY_FIELD, key),
        AuthTransport::Query => request.query(&[(API_KEY_FIELD, key)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(api_key: Option<&str>, transport: AuthTransport) -> reqwest::Request {
        let client = reqwest::Client::new();
        apply_auth(client.get("http://localhost:8000/chat"), api_key, transport)
            .build()
            .unwrap()
    }

    #[test]
    fn header_transport_sets_header_only() {
        let req = build(Some("secret"), AuthTransport::Header);
        assert_eq!(
            req.headers().get(API_KEY_FIELD).unwrap().to_str().unwrap(),
            "secret"
        );
        assert_eq!(req.url().query(), None);
    }

    #[test]
    fn query_transport_sets_query_only() {
        let req = build(Some("secret"), AuthTransport::Query);
        assert!(req.headers().get(API_KEY_FIELD).is_none());
        assert_eq!(req.url().query(), Some("api_key_header_value=secret"));
    }

    #[test]
    fn missing_key_attaches_nothing() {
        for transport in [AuthTransport::Header, AuthTransport::Query] {
            let req = build(None, transport);
            assert!(req.headers().get(API_KEY_FIELD).is_none());
            assert_eq!(req.url().query(), None);
        }
    }

    #[test]
    fn transport_parses_case_insensitively() {
        assert_eq!("query".parse::<AuthTransport>().unwrap(), AuthTransport::Query);
        assert_eq!("HEADER".parse::<AuthTransport>().unwrap(), AuthTransport::Header);
        assert!("cookie".parse::<AuthTransport>().is_err());
        assert_eq!(AuthTransport::Query.to_string(), "query");
    }
}
