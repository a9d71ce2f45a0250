//! Domain items and the per-run ownership index.

use std::collections::HashMap;

use tracing::debug;

use super::address::Address;
use super::error::CheckError;

/// Suffix every checked domain name must carry.
pub const TLD_SUFFIX: &str = ".ton";

/// The `.ton` DNS collection on mainnet.
pub const DNS_COLLECTION: &str = "EQC3dNlesgVD8YbAazcauIrXBPfiVhMMr5YYk2in0Mtsz0Bz";

/// One registered domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainItem {
    /// Canonical name, e.g. `durov.ton`.
    pub name: String,
    /// Address of this domain's NFT item contract.
    pub address: Address,
    /// Collection the item belongs to.
    pub collection_address: Address,
}

/// Reject names that lack the TLD suffix or have nothing in front of it.
pub fn validate_domain_name(name: &str) -> Result<(), CheckError> {
    match name.strip_suffix(TLD_SUFFIX) {
        Some(label) if !label.is_empty() => Ok(()),
        _ => Err(CheckError::InvalidDomain(name.to_string())),
    }
}

/// Name → item lookup of everything the wallet holds in the DNS collection.
///
/// Built once before fan-out and never mutated afterwards, so concurrent
/// evaluations read it through a plain `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    items: HashMap<String, DomainItem>,
}

impl OwnershipIndex {
    /// An index with no entries (lite mode).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep only items of `collection`; a repeated name overwrites the earlier entry.
    pub fn from_items<I>(items: I, collection: &Address) -> Self
    where
        I: IntoIterator<Item = DomainItem>,
    {
        let mut map = HashMap::new();
        for item in items {
            if item.collection_address != *collection {
                debug!(name = %item.name, "Skipping item outside the DNS collection");
                continue;
            }
            map.insert(item.name.clone(), item);
        }
        Self { items: map }
    }

    pub fn get(&self, name: &str) -> Option<&DomainItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainItem> {
        self.items.values()
    }
}
