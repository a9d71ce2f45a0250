//! Chain Gateway Port - DNS Resolution and Item Get-Methods
//!
//! Narrow view of the TON blockchain needed by the checker: resolving a
//! `.ton` name to its NFT item and reading two get-methods of that item.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Address;

/// Get-method returning the Unix time of the last fill-up.
pub const METHOD_LAST_FILL_UP_TIME: &str = "get_last_fill_up_time";

/// Standard NFT get-method; entry 3 of its result is the owner address.
pub const METHOD_NFT_DATA: &str = "get_nft_data";

/// Read-only access to the chain.
///
/// Implementations are expected to retry transient failures themselves;
/// callers treat any returned error as final for the current domain.
#[async_trait]
pub trait ChainGateway: Send + Sync + 'static {
  /// Resolve a domain name to the address of its NFT item contract.
  async fn resolve_domain(&self, name: &str) -> anyhow::Result<Address>;

  /// Timestamp of the last fill-up of a DNS item.
  async fn last_fill_up_time(&self, item: &Address) -> anyhow::Result<DateTime<Utc>>;

  /// Current owner of an NFT item.
  async fn item_owner(&self, item: &Address) -> anyhow::Result<Address>;
}
