//! Email service and data models for the GleSYS API.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::EmailService;
pub use models::{
    EditAccountParams, EmailAccount, EmailGlobalQuota, EmailList, EmailOverview,
    GlobalQuotaParams, ListEmailsParams, OverviewParams,
};

/// Convenient result alias sharing the `glesys-core` error type.
pub type Result<T> = glesys_core::Result<T>;
