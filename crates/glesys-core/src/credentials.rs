//! Credential context shared by every request a client makes.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.glesys.com";

/// Library name/version token appended to the `User-Agent` header.
pub const LIBRARY_TOKEN: &str = concat!("glesys-rust/", env!("CARGO_PKG_VERSION"));

/// Identity, secret and addressing for API calls.
///
/// The only mutation is [`Credentials::set_base_url`], which takes `&mut self`
/// and therefore cannot overlap with requests that borrow the context.
#[derive(Debug)]
pub struct Credentials {
    identity: String,
    secret: SecretString,
    base_url: Url,
    user_agent: String,
    library_token: String,
}

impl Credentials {
    /// Create credentials for the production endpoint.
    ///
    /// # Arguments
    ///
    /// * `identity` - Project (or user) identifier used as the Basic auth username
    /// * `secret` - API key used as the Basic auth password
    /// * `user_agent` - Free-text application identifier, may be empty
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed.
    pub fn new(
        identity: impl Into<String>,
        secret: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            identity: identity.into(),
            secret: SecretString::from(secret.into()),
            base_url,
            user_agent: user_agent.into(),
            library_token: LIBRARY_TOKEN.to_string(),
        })
    }

    /// Replace the library name/version token.
    #[must_use]
    pub fn with_library_token(mut self, token: impl Into<String>) -> Self {
        self.library_token = token.into();
        self
    }

    /// Builder-style variant of [`Credentials::set_base_url`].
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be parsed.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.set_base_url(base_url)?;
        Ok(self)
    }

    /// Builder-style variant taking an already parsed URL.
    #[must_use]
    pub fn with_parsed_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Re-parse and replace the base URL.
    ///
    /// HTTPS is not enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be parsed; the previous URL is kept.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL `{base_url}`: {e}")))?;
        Ok(())
    }

    /// Basic auth username.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Application identifier as supplied by the caller.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Library name/version token.
    #[must_use]
    pub fn library_token(&self) -> &str {
        &self.library_token
    }

    /// `User-Agent` header value: application identifier and library token,
    /// trimmed of surrounding whitespace.
    #[must_use]
    pub fn user_agent_header(&self) -> String {
        format!("{} {}", self.user_agent, self.library_token)
            .trim()
            .to_string()
    }

    /// `Authorization` header value for HTTP Basic auth.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let pair = format!("{}:{}", self.identity, self.secret.expose_secret());
        format!("Basic {}", STANDARD.encode(pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(user_agent: &str) -> Credentials {
        Credentials::new("project-id", "api-key", user_agent)
            .unwrap()
            .with_library_token("lib/7.0.1")
    }

    #[test]
    fn user_agent_combines_application_and_library() {
        assert_eq!(credentials("foo/1.0").user_agent_header(), "foo/1.0 lib/7.0.1");
    }

    #[test]
    fn empty_user_agent_has_no_leading_space() {
        assert_eq!(credentials("").user_agent_header(), "lib/7.0.1");
    }

    #[test]
    fn default_library_token_names_the_crate() {
        let creds = Credentials::new("project-id", "api-key", "").unwrap();
        assert!(creds.library_token().starts_with("glesys-rust/"));
        assert_eq!(creds.user_agent_header(), LIBRARY_TOKEN);
    }

    #[test]
    fn authorization_is_basic_auth() {
        // base64("project-id:api-key")
        assert_eq!(
            credentials("").authorization_header(),
            "Basic cHJvamVjdC1pZDphcGkta2V5"
        );
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let output = format!("{:?}", credentials(""));
        assert!(!output.contains("api-key"));
        assert!(output.contains("project-id"));
    }

    #[test]
    fn default_base_url_is_production() {
        assert_eq!(credentials("").base_url().as_str(), "https://api.glesys.com/");
    }

    #[test]
    fn set_base_url_replaces_url() {
        let mut creds = credentials("");
        creds.set_base_url("https://dev-api.glesys.test").unwrap();
        assert_eq!(creds.base_url().host_str(), Some("dev-api.glesys.test"));
    }

    #[test]
    fn set_base_url_rejects_garbage_and_keeps_previous() {
        let mut creds = credentials("");
        let err = creds.set_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert_eq!(creds.base_url().as_str(), "https://api.glesys.com/");
    }

    #[test]
    fn plain_http_base_url_is_accepted() {
        let creds = credentials("").with_base_url("http://localhost:8080").unwrap();
        assert_eq!(creds.base_url().scheme(), "http");
    }
}
