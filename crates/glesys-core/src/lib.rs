//! # glesys-core
//!
//! Request/response transport core shared by every GleSYS API service.
//!
//! This crate owns the parts of the client that are not resource-specific:
//! authentication and request construction, the `{"response": ...}` envelope
//! convention, classification of failed calls, and helpers used to build
//! parameter records before a request is sent.
//!
//! ## Modules
//!
//! - [`credentials`] - Identity, secret, base URL and `User-Agent` composition
//! - [`request`] - Outbound request construction
//! - [`transport`] - Pluggable HTTP sender and the single-round-trip executor
//! - [`envelope`] - Response envelope decoding
//! - [`classify`] - Conversion of non-200 responses into errors
//! - [`api`] - The `get`/`post` capability handed to resource services
//! - [`client`] - The top-level client that ties everything together
//! - [`merge`] - Sparse-override default merging for parameter records
//! - [`path`] - Optional `/filter/<f>/page/<n>` path suffixes
//! - [`config`] - Configuration structures for clients and HTTP senders
//! - [`testing`] - In-memory sender double for deterministic tests
//! - [`error`] - Error types

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod classify;
pub mod client;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod merge;
pub mod path;
pub mod request;
pub mod testing;
pub mod transport;

// Re-export commonly used types
pub use api::{ApiClient, ApiClientExt};
pub use client::Client;
pub use credentials::{Credentials, DEFAULT_BASE_URL, LIBRARY_TOKEN};
pub use envelope::Envelope;
pub use error::{Error, Result, TransportError};
pub use merge::{WithDefaults, ZeroValue};
pub use path::PathSuffix;
