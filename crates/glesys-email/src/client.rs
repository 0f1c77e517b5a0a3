//! Email service.

use crate::models::{
    EditAccountParams, EmailAccount, EmailGlobalQuota, EmailList, EmailOverview,
    GlobalQuotaParams, ListEmailsParams, OverviewParams,
};
use crate::Result;
use glesys_core::{ApiClient, ApiClientExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Operations on the `email/*` endpoints.
#[derive(Clone)]
pub struct EmailService {
    client: Arc<dyn ApiClient>,
}

#[derive(Deserialize)]
struct OverviewPayload {
    overview: EmailOverview,
}

#[derive(Deserialize)]
struct GlobalQuotaPayload {
    #[serde(rename = "globalquota")]
    global_quota: EmailGlobalQuota,
}

#[derive(Deserialize)]
struct ListPayload {
    list: EmailList,
}

#[derive(Deserialize)]
struct AccountPayload {
    #[serde(rename = "emailaccount")]
    email_account: EmailAccount,
}

#[derive(Serialize)]
struct ListBody<'a> {
    #[serde(flatten)]
    params: &'a ListEmailsParams,
    #[serde(rename = "domainname")]
    domain_name: &'a str,
}

#[derive(Serialize)]
struct EditAccountBody<'a> {
    #[serde(flatten)]
    params: &'a EditAccountParams,
    #[serde(rename = "emailaccount")]
    email_account: &'a str,
}

impl EmailService {
    /// Create a service over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Summary of email domains and accounts, optionally filtered and paged.
    pub async fn overview(&self, params: &OverviewParams) -> Result<EmailOverview> {
        let path = format!("email/overview{}", params.path_suffix());
        debug!(%path, "Fetching email overview");
        let payload: OverviewPayload = self.client.get_json(&path).await?;
        Ok(payload.overview)
    }

    /// Read, and optionally change, the global email quota.
    pub async fn global_quota(&self, params: GlobalQuotaParams) -> Result<EmailGlobalQuota> {
        let payload: GlobalQuotaPayload =
            self.client.post_json("email/globalquota", &params).await?;
        Ok(payload.global_quota)
    }

    /// Accounts and aliases on `domain`.
    pub async fn list(&self, domain: &str, params: &ListEmailsParams) -> Result<EmailList> {
        let body = ListBody {
            params,
            domain_name: domain,
        };
        let payload: ListPayload = self.client.post_json("email/list", &body).await?;
        Ok(payload.list)
    }

    /// Change settings on one email account.
    pub async fn edit_account(
        &self,
        email_account: &str,
        params: &EditAccountParams,
    ) -> Result<EmailAccount> {
        let body = EditAccountBody {
            params,
            email_account,
        };
        let payload: AccountPayload = self.client.post_json("email/editaccount", &body).await?;
        Ok(payload.email_account)
    }
}
