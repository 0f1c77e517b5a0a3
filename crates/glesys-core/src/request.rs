//! Outbound request construction.
//!
//! [`RequestBuilder`] performs no I/O: it resolves the path, encodes the
//! parameters and attaches the standard headers, yielding an
//! [`OutboundRequest`] that any [`HttpSender`](crate::transport::HttpSender)
//! can execute.

use crate::credentials::Credentials;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use url::Url;

/// HTTP verbs used by the GleSYS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`, used for parameterless reads
    Get,
    /// `POST`, used for mutations and parameterized reads
    Post,
}

impl Method {
    /// The method as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully formed request, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Header name/value pairs in insertion order
    pub headers: Vec<(String, String)>,
    /// JSON-encoded parameters, if any
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builds requests on behalf of one [`Credentials`] context.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder borrowing the credential context.
    #[must_use]
    pub const fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Build a request for `path`, relative to the base URL.
    ///
    /// Relative paths are joined onto the base URL; absolute paths and full
    /// URLs replace the corresponding parts of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPath`] when `path` is not a valid URL
    /// reference and [`Error::Serialization`] when `params` cannot be encoded.
    pub fn build<P>(
        &self,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<OutboundRequest>
    where
        P: Serialize + ?Sized,
    {
        let url = self
            .credentials
            .base_url()
            .join(path)
            .map_err(|err| Error::MalformedPath(format!("Invalid path `{path}`: {err}")))?;

        let body = params
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| Error::Serialization(err.to_string()))?;

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "User-Agent".to_string(),
                self.credentials.user_agent_header(),
            ),
            (
                "Authorization".to_string(),
                self.credentials.authorization_header(),
            ),
        ];

        Ok(OutboundRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};
    use serde_json::json;
    use std::collections::HashMap;

    fn credentials() -> Credentials {
        Credentials::new("project-id", "api-key", "test-application/0.0.1")
            .unwrap()
            .with_library_token("glesys-rust/7.0.1")
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn request_has_standard_headers() {
        let creds = credentials();
        let request = RequestBuilder::new(&creds)
            .build::<()>(Method::Get, "/", None)
            .unwrap();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.header("User-Agent"),
            Some("test-application/0.0.1 glesys-rust/7.0.1")
        );
        assert!(!request.header("Authorization").unwrap_or_default().is_empty());
    }

    #[test]
    fn authorization_is_present_with_and_without_body() {
        let creds = credentials();
        let builder = RequestBuilder::new(&creds);
        let get = builder.build::<()>(Method::Get, "server/list", None).unwrap();
        let post = builder
            .build(Method::Post, "server/start", Some(&json!({"serverid": "kvm1"})))
            .unwrap();

        assert_eq!(get.header("Authorization"), post.header("Authorization"));
        assert!(get.body.is_none());
        assert!(post.body.is_some());
    }

    #[test]
    fn relative_path_is_joined_onto_base() {
        let creds = credentials();
        let request = RequestBuilder::new(&creds)
            .build::<()>(Method::Get, "server/list", None)
            .unwrap();
        assert_eq!(request.url.as_str(), "https://api.glesys.com/server/list");
    }

    #[test]
    fn full_url_overrides_base() {
        let creds = credentials();
        let request = RequestBuilder::new(&creds)
            .build::<()>(Method::Get, "https://other.example/ping", None)
            .unwrap();
        assert_eq!(request.url.as_str(), "https://other.example/ping");
    }

    #[test]
    fn malformed_path_is_rejected() {
        let creds = credentials();
        let err = RequestBuilder::new(&creds)
            .build::<()>(Method::Get, "http://[::1", None)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedPath(_)));
    }

    #[test]
    fn body_round_trips_to_params() {
        let creds = credentials();
        let params = json!({"serverid": "kvm123", "keepip": true, "tags": ["a", "b"]});
        let request = RequestBuilder::new(&creds)
            .build(Method::Post, "server/destroy", Some(&params))
            .unwrap();

        let decoded: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn serialization_failure_aborts_build() {
        let creds = credentials();
        let err = RequestBuilder::new(&creds)
            .build(Method::Post, "server/create", Some(&Unencodable))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn non_string_map_keys_fail_serialization() {
        let creds = credentials();
        let mut params = HashMap::new();
        params.insert((1, 2), "value");
        let err = RequestBuilder::new(&creds)
            .build(Method::Post, "server/create", Some(&params))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn building_twice_is_deterministic() {
        let creds = credentials();
        let builder = RequestBuilder::new(&creds);
        let params = json!({"hostname": "web-1", "cpucores": 2});
        let first = builder
            .build(Method::Post, "server/create", Some(&params))
            .unwrap();
        let second = builder
            .build(Method::Post, "server/create", Some(&params))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
