//! Pluggable HTTP sender and the single-round-trip executor.
//!
//! [`HttpSender`] is the seam between request handling and the network. The
//! production implementation is [`ReqwestSender`]; tests substitute
//! [`CannedSender`](crate::testing::CannedSender) or a mock.

use crate::classify::{classify, SUCCESS_STATUS};
use crate::config::HttpConfig;
use crate::request::{Method, OutboundRequest};
use crate::{Error, Result, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// A response with its body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Complete response body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability that performs one HTTP exchange.
///
/// Implementations must read the whole body before returning so the
/// connection can be released.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpSender: Send + Sync {
    /// Send `request` and return the response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network-level failures.
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<RawResponse, TransportError>;
}

/// [`HttpSender`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    http: Client,
}

impl ReqwestSender {
    /// Build a sender from the HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if !config.enable_compression {
            builder = builder.no_gzip();
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse { status, body })
    }
}

/// Executes built requests and classifies the outcome.
///
/// Exactly one send per call, never retried.
#[derive(Clone)]
pub struct Transport {
    sender: Arc<dyn HttpSender>,
    deadline: Option<Duration>,
}

impl Transport {
    /// Create an executor around `sender`.
    #[must_use]
    pub fn new(sender: Arc<dyn HttpSender>) -> Self {
        Self {
            sender,
            deadline: None,
        }
    }

    /// Cancel any call that has not completed within `deadline`.
    ///
    /// A cancelled call fails with [`TransportError::Cancelled`].
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The configured per-call deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Send `request` and return the body of a 200 response.
    ///
    /// # Errors
    ///
    /// Transport failures are returned unchanged as [`Error::Transport`]; any
    /// status other than 200 is turned into an error by [`classify`].
    pub async fn execute(&self, request: OutboundRequest) -> Result<Bytes> {
        debug!(method = %request.method, path = request.url.path(), "GleSYS request");

        let response = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.sender.send(request))
                .await
                .map_err(|_| {
                    TransportError::Cancelled(format!("deadline of {deadline:?} elapsed"))
                })??,
            None => self.sender.send(request).await?,
        };

        trace!(
            status = response.status,
            bytes = response.body.len(),
            "GleSYS response"
        );

        if response.status == SUCCESS_STATUS {
            Ok(response.body)
        } else {
            Err(classify(response.status, &response.body))
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::request::RequestBuilder;
    use mockall::predicate::always;

    fn request() -> OutboundRequest {
        let creds = Credentials::new("project-id", "api-key", "").unwrap();
        RequestBuilder::new(&creds)
            .build::<()>(Method::Get, "/", None)
            .unwrap()
    }

    fn transport(status: u16, body: &'static str) -> Transport {
        let mut sender = MockHttpSender::new();
        sender
            .expect_send()
            .with(always())
            .times(1)
            .returning(move |_| Ok(RawResponse::new(status, body)));
        Transport::new(Arc::new(sender))
    }

    #[tokio::test]
    async fn status_200_returns_body() {
        let body = transport(200, r#"{ "response": { "hello": "world" } }"#)
            .execute(request())
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{ "response": { "hello": "world" } }"#);
    }

    #[tokio::test]
    async fn non_200_status_is_classified() {
        let err = transport(500, r#"{ "response": { "foo": "bar" } }"#)
            .execute(request())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn status_204_is_an_error() {
        let err = transport(204, "{}").execute(request()).await.unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn transport_failure_is_propagated_unchanged() {
        let mut sender = MockHttpSender::new();
        sender
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError::Connect("connection refused".to_string())));

        let err = Transport::new(Arc::new(sender))
            .execute(request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Transport(TransportError::Connect("connection refused".to_string()))
        );
    }

    struct StalledSender;

    #[async_trait]
    impl HttpSender for StalledSender {
        async fn send(
            &self,
            _request: OutboundRequest,
        ) -> std::result::Result<RawResponse, TransportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RawResponse::new(200, "{}"))
        }
    }

    #[tokio::test]
    async fn deadline_surfaces_as_cancellation() {
        let err = Transport::new(Arc::new(StalledSender))
            .with_deadline(Duration::from_millis(50))
            .execute(request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Cancelled(_))
        ));
        assert!(err.is_cancelled());
    }
}
