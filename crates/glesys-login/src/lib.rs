//! Bootstrap login for the GleSYS API.
//!
//! A [`LoginClient`] talks to the API before any project credentials exist.
//! [`UserService::login`] exchanges a username, password and optional
//! one-time code for a user API key, and [`LoginClient::authenticated`] turns
//! the result into a regular [`glesys_core::Client`].
//!
//! ```no_run
//! # async fn run() -> glesys_core::Result<()> {
//! use glesys_login::{LoginClient, UserService};
//! use std::sync::Arc;
//!
//! let login = LoginClient::new("my-app/1.0")?;
//! let details = login.users().login("alice", "hunter2", "123456").await?;
//!
//! let users = UserService::new(Arc::new(login.authenticated(&details)?));
//! let organizations = users.list_organizations().await?;
//! # let _ = organizations;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{LoginClient, UserService};
pub use models::{Customer, CustomerProject, LoginDetails, UserOrganization};

/// Convenient result alias sharing the `glesys-core` error type.
pub type Result<T> = glesys_core::Result<T>;
