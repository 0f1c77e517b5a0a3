//! Error types for GleSYS API calls.
//!
//! Every failed call produces exactly one [`Error`]. Network-level failures are
//! carried unchanged inside [`Error::Transport`]; everything that happened after
//! a response arrived is either [`Error::Http`] or [`Error::Decode`].

use thiserror::Error;

/// Network-level failure reported by an HTTP sender.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The sender gave up waiting for the server
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// No connection could be established (refused, DNS failure, TLS failure)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The call was cancelled before a response arrived
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Any other failure while sending or reading the response
    #[error("Transport failure: {0}")]
    Other(String),
}

/// Main error type for GleSYS operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request path is not a valid URL reference
    #[error("Malformed path: {0}")]
    MalformedPath(String),

    /// Request parameters could not be encoded as JSON
    #[error("Failed to serialize request parameters: {0}")]
    Serialization(String),

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200
    #[error("Request failed with HTTP error: {status} ({text})")]
    Http {
        /// HTTP status code
        status: u16,
        /// Trimmed `response.status.text` from the body
        text: String,
    },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for GleSYS operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedPath(_) => "MALFORMED_PATH",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status code, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 4xx answer.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }

    /// Returns true for a 5xx answer.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| (500..600).contains(&status))
    }

    /// Returns true if the call was cancelled or hit a deadline.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Cancelled(_) | TransportError::Timeout(_))
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::MalformedPath(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
