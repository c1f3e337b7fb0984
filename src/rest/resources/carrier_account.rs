//! CarrierAccount resource implementation.
//!
//! A carrier account holds the credentials the platform uses to quote and
//! buy with one carrier. Every [`Rate`](super::Rate) names the account that
//! produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceOperation, ResourcePath};

/// Credentials for one carrier.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CarrierAccount {
    /// The account identifier (`ca_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the account was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the account last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// The carrier account type, e.g. `"UpsAccount"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    /// A human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A caller-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// The carrier's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable: Option<String>,

    /// Who is billed: `"carrier"` or the account owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_type: Option<String>,

    /// Production credentials (carrier-specific fields).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,

    /// Test credentials (carrier-specific fields).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_credentials: Option<Value>,
}

impl Resource for CarrierAccount {
    const NAME: &'static str = "CarrierAccount";
    const KEY: &'static str = "carrier_account";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "carrier_accounts",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "carrier_accounts/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_carrier_account_type_field() {
        let account: CarrierAccount = serde_json::from_value(json!({
            "id": "ca_123",
            "object": "CarrierAccount",
            "type": "UspsAccount",
            "readable": "USPS",
            "credentials": {"company_name": "EasyPost"}
        }))
        .unwrap();

        assert_eq!(account.account_type.as_deref(), Some("UspsAccount"));
        assert_eq!(account.credentials.unwrap()["company_name"], "EasyPost");

        let value = serde_json::to_value(CarrierAccount {
            account_type: Some("UpsAccount".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, json!({"type": "UpsAccount"}));
    }
}
