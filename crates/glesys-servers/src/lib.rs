//! Server service and data models for the GleSYS API.
//!
//! Provides typed parameter records, including provider defaults for new
//! servers, and an asynchronous service over the `server/*` endpoints.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ServerService;
pub use models::{
    generate_hostname, CreateServerParams, DestroyServerParams, EditServerParams, Server,
    ServerDetails, ServerPlatformTemplates, StopServerParams, StopType, User,
};

/// Convenient result alias sharing the `glesys-core` error type.
pub type Result<T> = glesys_core::Result<T>;
