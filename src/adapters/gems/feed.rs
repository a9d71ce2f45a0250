//! `ItemFeed` over the getgems indexer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::client::GemsClient;
use super::types::{
    HISTORY_QUERY, HistoryData, HistoryVars, ItemNode, OWNED_ITEMS_QUERY, OwnedItemsData,
    OwnedItemsVars,
};
use crate::domain::Address;
use crate::ports::{HistoryEvent, ItemFeed, OwnedItem, Page};

pub struct GemsFeed {
    client: GemsClient,
}

impl GemsFeed {
    pub const fn new(client: GemsClient) -> Self {
        Self { client }
    }
}

/// Items outside any collection can't be DNS items and are dropped.
fn to_owned_item(node: ItemNode) -> Result<Option<OwnedItem>> {
    let Some(collection) = node.collection else {
        debug!(item = %node.address, "Skipping item without collection");
        return Ok(None);
    };
    Ok(Some(OwnedItem {
        address: node
            .address
            .parse()
            .with_context(|| format!("invalid item address {}", node.address))?,
        collection_address: collection
            .address
            .parse()
            .with_context(|| format!("invalid collection address {}", collection.address))?,
        name: node.name,
    }))
}

#[async_trait]
impl ItemFeed for GemsFeed {
    #[instrument(skip(self), fields(owner = %owner))]
    async fn owned_items_page(
        &self,
        owner: &Address,
        first: u32,
        after: Option<String>,
    ) -> Result<Page<OwnedItem>> {
        let owner_address = owner.to_string();
        let data: OwnedItemsData = self
            .client
            .query(
                "nftItemsByOwner",
                OWNED_ITEMS_QUERY,
                OwnedItemsVars {
                    owner_address: &owner_address,
                    first,
                    after,
                },
            )
            .await?;

        let conn = data.nft_items_by_owner;
        let mut items = Vec::with_capacity(conn.items.len());
        for node in conn.items {
            if let Some(item) = to_owned_item(node)? {
                items.push(item);
            }
        }
        Ok(Page::with_cursor(items, conn.cursor.unwrap_or_default()))
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn history_page(
        &self,
        item: &Address,
        first: u32,
        after: Option<String>,
    ) -> Result<Page<HistoryEvent>> {
        let address = item.to_string();
        let data: HistoryData = self
            .client
            .query(
                "historyNftItem",
                HISTORY_QUERY,
                HistoryVars {
                    address: &address,
                    first,
                    after,
                },
            )
            .await?;

        let conn = data.history_nft_item;
        let events = conn
            .items
            .into_iter()
            .map(|node| HistoryEvent {
                created_at: node.created_at,
            })
            .collect();
        Ok(Page::with_cursor(events, conn.cursor.unwrap_or_default()))
    }
}
