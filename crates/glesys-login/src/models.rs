//! Login data models.

use crate::Result;
use glesys_core::Credentials;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// Login request body. The one-time code is left out when empty.
#[derive(Debug, Serialize)]
pub(crate) struct LoginParams<'a> {
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) otp: Option<&'a str>,
}

impl<'a> LoginParams<'a> {
    pub(crate) fn new(username: &'a str, password: &'a str, otp: &'a str) -> Self {
        Self {
            username,
            password,
            otp: (!otp.is_empty()).then_some(otp),
        }
    }
}

/// A customer (organization) the user can act for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer number.
    #[serde(rename = "customernumber")]
    pub customer_number: String,
    /// Description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// The user's roles on this customer.
    pub roles: Vec<String>,
}

/// Result of a successful login.
///
/// The API key is kept as a secret and does not appear in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct LoginDetails {
    /// User name.
    #[serde(default)]
    pub username: String,
    /// User API key.
    #[serde(rename = "apikey", deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,
    /// Accounts the user belongs to.
    #[serde(default)]
    pub accounts: Vec<Customer>,
    /// Customers the user belongs to.
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl LoginDetails {
    /// Credentials that authenticate as this user against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential context cannot be built.
    pub fn into_credentials(self, user_agent: impl Into<String>) -> Result<Credentials> {
        Credentials::new(self.username, self.api_key.expose_secret(), user_agent)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// A project within an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProject {
    /// Project account name, e.g. `CL12345`.
    #[serde(rename = "accountname")]
    pub account_name: String,
    /// Display name.
    pub name: String,
    /// Colour used in the web UI.
    pub color: String,
    /// Billing currency.
    pub currency: String,
    /// Reason the project is locked, if it is.
    #[serde(rename = "lockedreason")]
    pub locked_reason: String,
    /// The user's access level.
    pub access: String,
    /// Owning customer number.
    #[serde(rename = "customernumber")]
    pub customer_number: u64,
}

/// An organization the user is a member of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOrganization {
    /// Organization number.
    pub id: u64,
    /// Organization state.
    pub state: String,
    /// Enabled feature flags.
    #[serde(rename = "featureflags")]
    pub feature_flags: Vec<String>,
    /// Verification state.
    pub verification: String,
    /// `business` or `personal`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `yes` if the user owns the organization.
    #[serde(rename = "isowner")]
    pub is_owner: String,
    /// Contact person.
    #[serde(rename = "contactperson")]
    pub contact_person: String,
    /// Organization name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    #[serde(rename = "zipcode")]
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Invoice reference.
    #[serde(rename = "invoicereference")]
    pub invoice_reference: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    /// `yes` if the user can see billing.
    #[serde(rename = "canaccessbilling")]
    pub can_access_billing: String,
    /// VAT number.
    #[serde(rename = "vatnumber")]
    pub vat_number: String,
    /// Payment method.
    #[serde(rename = "paymentmethod")]
    pub payment_method: String,
    /// Allowed payment methods.
    #[serde(rename = "allowedpaymentmethods")]
    pub allowed_payment_methods: Vec<String>,
    /// Payment terms in days.
    #[serde(rename = "paymenttermsnetdays")]
    pub payment_terms_net_days: u32,
    /// Support level.
    #[serde(rename = "slalevel")]
    pub sla_level: String,
}
