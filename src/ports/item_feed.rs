//! Item Feed Port - Indexed NFT Ownership and History
//!
//! Page-level access to an NFT indexer. Pagination, throttling and
//! aggregation live in the use cases; adapters fetch one page per call.

use async_trait::async_trait;

use crate::domain::Address;

/// One page of a cursor-paginated feed.
#[derive(Debug, Clone)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// Cursor of the next page; `None` when the feed is exhausted.
  pub next_cursor: Option<String>,
}

impl<T> Page<T> {
  /// A final page.
  pub fn last(items: Vec<T>) -> Self {
    Self {
      items,
      next_cursor: None,
    }
  }

  pub fn with_cursor(items: Vec<T>, cursor: impl Into<String>) -> Self {
    let cursor = cursor.into();
    Self {
      items,
      next_cursor: (!cursor.is_empty()).then_some(cursor),
    }
  }
}

/// An NFT currently held by an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedItem {
  pub name: String,
  pub address: Address,
  pub collection_address: Address,
}

/// One event from an item's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEvent {
  /// Unix seconds.
  pub created_at: i64,
}

#[async_trait]
pub trait ItemFeed: Send + Sync + 'static {
  /// Items held by `owner`, `first` per page, starting after `after`.
  async fn owned_items_page(
    &self,
    owner: &Address,
    first: u32,
    after: Option<String>,
  ) -> anyhow::Result<Page<OwnedItem>>;

  /// History events of `item`, `first` per page, starting after `after`.
  async fn history_page(
    &self,
    item: &Address,
    first: u32,
    after: Option<String>,
  ) -> anyhow::Result<Page<HistoryEvent>>;
}
