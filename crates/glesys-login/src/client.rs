//! Login client and user service.

use crate::models::{CustomerProject, LoginDetails, LoginParams, UserOrganization};
use crate::Result;
use glesys_core::config::ClientConfig;
use glesys_core::transport::HttpSender;
use glesys_core::{ApiClient, ApiClientExt, Client, Credentials};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Client for calls made before project credentials exist.
///
/// Uses the same transport contract as [`Client`] but carries no identity.
#[derive(Debug, Clone)]
pub struct LoginClient {
    client: Client,
}

impl LoginClient {
    /// Create a login client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP sender cannot be constructed.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new("", "", user_agent)?,
        })
    }

    /// Create a login client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP sender
    /// cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::from_config("", "", config)?,
        })
    }

    /// Create a login client around an explicit sender.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential context cannot be built.
    pub fn with_sender(user_agent: impl Into<String>, sender: Arc<dyn HttpSender>) -> Result<Self> {
        let credentials = Credentials::new("", "", user_agent)?;
        Ok(Self {
            client: Client::with_sender(credentials, sender),
        })
    }

    /// Override the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the client is already
    /// shared.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.client.set_base_url(base_url)
    }

    /// The base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }

    /// The user service on this unauthenticated client.
    #[must_use]
    pub fn users(&self) -> UserService {
        UserService::new(Arc::new(self.client.clone()))
    }

    /// A client authenticating as the user behind `details`.
    ///
    /// Keeps this client's base URL, user agent and transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential context cannot be built.
    pub fn authenticated(&self, details: &LoginDetails) -> Result<Client> {
        let current = self.client.credentials();
        let credentials = Credentials::new(
            details.username.as_str(),
            details.api_key.expose_secret(),
            current.user_agent(),
        )?
        .with_library_token(current.library_token())
        .with_base_url(current.base_url().as_str())?;
        Ok(self.client.with_credentials(credentials))
    }
}

/// Operations on the `user/*` and `customer/*` endpoints.
#[derive(Clone)]
pub struct UserService {
    client: Arc<dyn ApiClient>,
}

#[derive(Deserialize)]
struct LoginPayload {
    login: LoginDetails,
}

#[derive(Deserialize)]
struct OrganizationsPayload {
    #[serde(default)]
    organizations: Vec<UserOrganization>,
}

#[derive(Deserialize)]
struct ProjectsPayload {
    #[serde(default)]
    projects: Vec<CustomerProject>,
}

#[derive(Serialize)]
struct OrganizationParams<'a> {
    organizationnumber: &'a str,
}

impl UserService {
    /// Create a service over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange a username and password, plus a one-time code when the
    /// account requires one, for a user API key.
    ///
    /// Pass an empty `otp` to log in without a one-time code.
    pub async fn login(&self, username: &str, password: &str, otp: &str) -> Result<LoginDetails> {
        debug!(username, with_otp = !otp.is_empty(), "Logging in");
        let params = LoginParams::new(username, password, otp);
        let payload: LoginPayload = self.client.post_json("user/login", &params).await?;
        Ok(payload.login)
    }

    /// Organizations the authenticated user belongs to.
    pub async fn list_organizations(&self) -> Result<Vec<UserOrganization>> {
        let payload: OrganizationsPayload =
            self.client.post_empty("user/listorganizations").await?;
        Ok(payload.organizations)
    }

    /// Projects within one organization.
    pub async fn list_customer_projects(
        &self,
        organization_number: &str,
    ) -> Result<Vec<CustomerProject>> {
        let params = OrganizationParams {
            organizationnumber: organization_number,
        };
        let payload: ProjectsPayload =
            self.client.post_json("customer/listprojects", &params).await?;
        Ok(payload.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glesys_core::request::Method;
    use glesys_core::testing::CannedSender;
    use glesys_core::Error;
    use serde_json::json;

    const LOGIN: &str = r#"{"response":{"login":{"username":"alice","apikey":"user-key","accounts":[{"customernumber":"12345","roles":["admin"]}],"customers":[]}}}"#;

    fn login_client(sender: &Arc<CannedSender>) -> LoginClient {
        LoginClient::with_sender("my-app/1.0", sender.clone()).unwrap()
    }

    #[tokio::test]
    async fn login_posts_credentials() {
        let sender = Arc::new(CannedSender::ok(LOGIN));
        let details = login_client(&sender)
            .users()
            .login("alice", "hunter2", "")
            .await
            .unwrap();

        let request = sender.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/user/login");
        assert_eq!(
            sender.last_body(),
            Some(json!({"username": "alice", "password": "hunter2"}))
        );
        assert_eq!(details.username, "alice");
        assert_eq!(details.accounts[0].customer_number, "12345");
        assert_eq!(details.accounts[0].roles, vec!["admin".to_string()]);
    }

    #[tokio::test]
    async fn login_with_otp() {
        let sender = Arc::new(CannedSender::ok(LOGIN));
        login_client(&sender)
            .users()
            .login("alice", "hunter2", "654321")
            .await
            .unwrap();

        assert_eq!(sender.last_body().unwrap()["otp"], json!("654321"));
    }

    #[tokio::test]
    async fn failed_login_is_an_http_error() {
        let sender = Arc::new(CannedSender::new(
            401,
            r#"{"response":{"status":{"code":401,"text":"Invalid credentials"}}}"#,
        ));
        let err = login_client(&sender)
            .users()
            .login("alice", "wrong", "")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Http {
                status: 401,
                text: "Invalid credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn authenticated_client_uses_login_details() {
        let sender = Arc::new(CannedSender::ok(LOGIN));
        let mut login = login_client(&sender);
        login.set_base_url("https://dev-api.glesys.test").unwrap();
        let details = login.users().login("alice", "hunter2", "").await.unwrap();

        let client = login.authenticated(&details).unwrap();
        assert_eq!(client.credentials().identity(), "alice");
        assert_eq!(client.credentials().user_agent(), "my-app/1.0");
        assert_eq!(client.base_url().as_str(), "https://dev-api.glesys.test/");
    }

    #[tokio::test]
    async fn list_organizations_posts_without_body() {
        let sender = Arc::new(CannedSender::ok(
            r#"{"response":{"organizations":[{"id":12345,"name":"Example AB","type":"business","isowner":"yes"}]}}"#,
        ));
        let organizations = login_client(&sender)
            .users()
            .list_organizations()
            .await
            .unwrap();

        let request = sender.last_request().unwrap();
        assert_eq!(request.url.path(), "/user/listorganizations");
        assert!(request.body.is_none());
        assert_eq!(organizations[0].id, 12345);
        assert_eq!(organizations[0].kind, "business");
    }

    #[tokio::test]
    async fn list_customer_projects_sends_organization_number() {
        let sender = Arc::new(CannedSender::ok(
            r#"{"response":{"projects":[{"accountname":"CL12345","name":"web","customernumber":12345}]}}"#,
        ));
        let projects = login_client(&sender)
            .users()
            .list_customer_projects("12345")
            .await
            .unwrap();

        assert_eq!(
            sender.last_body(),
            Some(json!({"organizationnumber": "12345"}))
        );
        assert_eq!(projects[0].account_name, "CL12345");
        assert_eq!(projects[0].customer_number, 12345);
    }
}
