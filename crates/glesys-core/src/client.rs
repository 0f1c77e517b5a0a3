//! Top-level GleSYS client.
//!
//! [`Client`] owns the credential context and the transport. It is cheap to
//! clone; clones share both, and every resource service is handed one as an
//! [`ApiClient`].

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::request::{Method, RequestBuilder};
use crate::transport::{HttpSender, ReqwestSender, Transport};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Authenticated client for the GleSYS API.
#[derive(Debug, Clone)]
pub struct Client {
    credentials: Arc<Credentials>,
    transport: Transport,
}

impl Client {
    /// Create a client for the production endpoint.
    ///
    /// # Arguments
    ///
    /// * `project` - Project identifier (for example `CL12345`)
    /// * `api_key` - API key for the project
    /// * `user_agent` - Application identifier, may be empty
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP sender cannot be constructed.
    pub fn new(
        project: impl Into<String>,
        api_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let config = ClientConfig::default().with_user_agent(user_agent);
        Self::from_config(project, api_key, &config)
    }

    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP sender
    /// cannot be constructed.
    pub fn from_config(
        project: impl Into<String>,
        api_key: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self> {
        config.validate()?;

        let base_url = config.parse_base_url()?;
        let credentials = Credentials::new(project, api_key, config.user_agent.clone())?
            .with_parsed_base_url(base_url);
        let sender = ReqwestSender::new(&config.http)?;

        Ok(Self::with_sender(credentials, Arc::new(sender)))
    }

    /// Create a client around an explicit sender.
    #[must_use]
    pub fn with_sender(credentials: Credentials, sender: Arc<dyn HttpSender>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            transport: Transport::new(sender),
        }
    }

    /// A client on the same transport that authenticates as `credentials`.
    #[must_use]
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
            transport: self.transport.clone(),
        }
    }

    /// Cancel calls that take longer than `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.transport = self.transport.with_deadline(deadline);
        self
    }

    /// Override the base URL.
    ///
    /// Must happen before the client is cloned or handed to services.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the credential context
    /// is already shared.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let credentials = Arc::get_mut(&mut self.credentials).ok_or_else(|| {
            Error::ConfigError("base URL cannot change once the client is shared".to_string())
        })?;
        credentials.set_base_url(base_url)
    }

    /// The credential context.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.credentials.base_url()
    }

    /// Build and execute one request.
    ///
    /// # Errors
    ///
    /// Returns any error from building, sending or classifying the request.
    pub async fn request<P>(&self, method: Method, path: &str, params: Option<&P>) -> Result<Bytes>
    where
        P: Serialize + ?Sized,
    {
        let request = RequestBuilder::new(&self.credentials).build(method, path, params)?;
        self.transport.execute(request).await
    }
}

#[async_trait]
impl ApiClient for Client {
    async fn get(&self, path: &str) -> Result<Bytes> {
        self.request::<Value>(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, params: Option<Value>) -> Result<Bytes> {
        self.request(Method::Post, path, params.as_ref()).await
    }
}
