//! tonapi Response Types
//!
//! Only the fields the gateway reads are modeled; everything else in the
//! responses is ignored.

use serde::Deserialize;

/// `GET /v2/dns/{domain_name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainInfo {
    pub name: String,
    /// NFT item backing the domain; absent for unminted names.
    pub item: Option<NftItemRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NftItemRef {
    /// Raw `wc:hex` address.
    pub address: String,
}

/// `GET /v2/blockchain/accounts/{account_id}/methods/{method_name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodExecutionResult {
    pub success: bool,
    pub exit_code: i32,
    #[serde(default)]
    pub stack: Vec<StackEntry>,
}

/// One TVM stack value.
#[derive(Debug, Clone, Deserialize)]
pub struct StackEntry {
    #[serde(rename = "type")]
    pub kind: String,
    /// Hex number, e.g. `0x6512bd43` or `-0x1`.
    pub num: Option<String>,
    /// Hex-encoded BOC.
    pub cell: Option<String>,
    /// Hex-encoded BOC.
    pub slice: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
