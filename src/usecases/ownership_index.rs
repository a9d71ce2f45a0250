//! Ownership Index Use Case - Wallet Holdings in the DNS Collection
//!
//! Walks the indexer's "items by owner" feed page by page, sleeping a fixed
//! delay between requests to stay under the indexer's rate limit, and
//! keeps only items of the configured DNS collection.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::domain::{Address, DomainItem, OwnershipIndex};
use crate::ports::ItemFeed;

/// Items requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Build the name → item index of everything `owner` holds in `collection`.
///
/// # Errors
/// Fails on the first page request that fails; a partial index is never
/// returned.
#[instrument(skip(feed, owner, collection), fields(owner = %owner))]
pub async fn build_index<F: ItemFeed + ?Sized>(
  feed: &F,
  owner: &Address,
  collection: &Address,
  delay: Duration,
) -> Result<OwnershipIndex> {
  let mut items = Vec::new();
  let mut cursor: Option<String> = None;
  let mut pages = 0u32;

  loop {
    let page = feed
      .owned_items_page(owner, PAGE_SIZE, cursor.take())
      .await
      .context("failed to load items")?;
    pages += 1;
    debug!(page = pages, items = page.items.len(), "Fetched owned items page");

    items.extend(page.items.into_iter().map(|owned| DomainItem {
      name: owned.name,
      address: owned.address,
      collection_address: owned.collection_address,
    }));

    match page.next_cursor {
      Some(next) => cursor = Some(next),
      None => break,
    }

    sleep(delay).await;
  }

  let fetched = items.len();
  let index = OwnershipIndex::from_items(items, collection);
  info!(pages, fetched, domains = index.len(), "Ownership index built");

  Ok(index)
}
