//! Email data models and request parameters.

use glesys_core::PathSuffix;
use serde::{Deserialize, Serialize};

/// One domain in the email overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverviewDomain {
    /// Domain name.
    #[serde(rename = "domainname")]
    pub domain_name: String,
    /// Display name.
    #[serde(rename = "displayname")]
    pub display_name: String,
    /// Number of accounts on the domain.
    pub accounts: u32,
    /// Number of aliases on the domain.
    pub aliases: u32,
}

/// Account-wide email usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverviewSummary {
    /// Accounts in use.
    pub accounts: u32,
    /// Account limit.
    #[serde(rename = "maxaccounts")]
    pub max_accounts: u32,
    /// Aliases in use.
    pub aliases: u32,
    /// Alias limit.
    #[serde(rename = "maxaliases")]
    pub max_aliases: u32,
}

/// Paging information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverviewMeta {
    /// Current page.
    pub page: u32,
    /// Total number of domains.
    pub total: u32,
    /// Domains per page.
    #[serde(rename = "perpage")]
    pub per_page: u32,
}

/// Summary of the project's email domains and accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOverview {
    /// Usage totals.
    pub summary: EmailOverviewSummary,
    /// Domains on this page.
    pub domains: Vec<EmailOverviewDomain>,
    /// Paging information.
    pub meta: EmailOverviewMeta,
}

/// Filtering and paging for `email/overview`.
///
/// Both travel as path segments; an empty filter or a zero page is left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewParams {
    /// Domain name filter.
    pub filter: String,
    /// 1-based page number.
    pub page: u32,
}

impl OverviewParams {
    /// The `/filter/<f>/page/<n>` suffix for these parameters.
    #[must_use]
    pub fn path_suffix(&self) -> String {
        PathSuffix::filter_and_page(&self.filter, self.page)
    }
}

/// Global email quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailGlobalQuota {
    /// Current usage.
    pub usage: u64,
    /// Quota.
    pub max: u64,
}

/// Parameters for `email/globalquota`. Leave `global_quota` unset to read
/// the current quota without changing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GlobalQuotaParams {
    /// New quota.
    #[serde(rename = "globalquota", skip_serializing_if = "Option::is_none")]
    pub global_quota: Option<u64>,
}

/// Per-account quota.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAccountQuota {
    /// Quota size.
    pub max: u64,
    /// Unit of `max`, e.g. `MB`.
    pub unit: String,
}

/// An email account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAccount {
    /// Account address.
    #[serde(rename = "emailaccount")]
    pub email_account: String,
    /// Display name.
    #[serde(rename = "displayname")]
    pub display_name: String,
    /// Quota.
    pub quota: EmailAccountQuota,
    /// Spam filter level.
    #[serde(rename = "antispamlevel")]
    pub anti_spam_level: u8,
    /// `yes` or `no`.
    #[serde(rename = "antivirus")]
    pub anti_virus: String,
    /// `yes` or `no`.
    #[serde(rename = "autorespond")]
    pub auto_respond: String,
    /// Auto-responder text.
    #[serde(rename = "autorespondmessage", skip_serializing_if = "String::is_empty")]
    pub auto_respond_message: String,
    /// `yes` or `no`.
    #[serde(rename = "autorespondsaveemail")]
    pub auto_respond_save_email: String,
    /// `yes` or `no`.
    #[serde(rename = "rejectspam")]
    pub reject_spam: String,
    /// Creation timestamp.
    pub created: String,
    /// Last modification timestamp.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub modified: String,
}

/// An email alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAlias {
    /// Alias address.
    #[serde(rename = "emailalias")]
    pub email_alias: String,
    /// Display name.
    #[serde(rename = "displayname")]
    pub display_name: String,
    /// Forwarding target.
    #[serde(rename = "goto")]
    pub go_to: String,
}

/// Accounts and aliases on one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailList {
    /// Accounts.
    #[serde(rename = "emailaccounts")]
    pub email_accounts: Vec<EmailAccount>,
    /// Aliases.
    #[serde(rename = "emailaliases")]
    pub email_aliases: Vec<EmailAlias>,
}

/// Filtering for `email/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListEmailsParams {
    /// Address filter.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
}

/// Parameters for `email/editaccount`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditAccountParams {
    /// Spam filter level.
    #[serde(rename = "antispamlevel", skip_serializing_if = "Option::is_none")]
    pub anti_spam_level: Option<u8>,
    /// `yes` or `no`.
    #[serde(rename = "antivirus", skip_serializing_if = "Option::is_none")]
    pub anti_virus: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `yes` or `no`.
    #[serde(rename = "autorespond", skip_serializing_if = "Option::is_none")]
    pub auto_respond: Option<String>,
    /// Auto-responder text.
    #[serde(rename = "autorespondmessage", skip_serializing_if = "Option::is_none")]
    pub auto_respond_message: Option<String>,
    /// Quota in MB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<u64>,
    /// `yes` or `no`.
    #[serde(rename = "rejectspam", skip_serializing_if = "Option::is_none")]
    pub reject_spam: Option<String>,
}
