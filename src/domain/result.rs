//! Per-domain report record.
//!
//! Serialized as camelCase JSON with every zero-valued field omitted. A
//! failed evaluation carries only `domainName` and `error`.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::expiration::{ExpirationFacts, format_date};

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckResult {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_need_to_renew: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_fill_up: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expiring_on: String,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub days_to_expire: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mint_date: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_assigned: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_mine: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner_raw_address: String,

    /// An action was taken for this domain during the current run.
    #[serde(skip_serializing_if = "is_false")]
    pub has_renewed_now: bool,
    /// Nanotons attached to the action taken this run.
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub renewal_amount: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl CheckResult {
    /// Result carrying only the domain name and the failure message.
    pub fn failed(domain_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            error: error.into(),
            ..Self::default()
        }
    }

    /// Report for a successfully evaluated domain, before any action.
    pub fn from_facts(
        domain_name: &str,
        item_address: &Address,
        owner: &Address,
        facts: &ExpirationFacts,
        is_assigned: bool,
        is_mine: bool,
    ) -> Self {
        Self {
            address: item_address.to_string(),
            domain_name: domain_name.to_string(),
            is_need_to_renew: facts.is_need_to_renew,
            last_fill_up: format_date(&facts.last_fill_up),
            expiring_on: format_date(&facts.expires_on),
            days_to_expire: facts.days_to_expire,
            mint_date: format_date(&facts.mint_date),
            is_assigned,
            is_mine,
            owner_address: owner.to_string(),
            owner_raw_address: owner.to_raw(),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
