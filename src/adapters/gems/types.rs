//! getgems GraphQL Types
//!
//! Request envelope, the two queries the feed issues, and their response
//! shapes.

use serde::{Deserialize, Serialize};

pub const OWNED_ITEMS_QUERY: &str = r"
query nftItemsByOwner($ownerAddress: String!, $first: Int!, $after: String) {
  nftItemsByOwner(ownerAddress: $ownerAddress, first: $first, after: $after) {
    cursor
    items { name address collection { address } }
  }
}";

pub const HISTORY_QUERY: &str = r"
query historyNftItem($address: String!, $first: Int!, $after: String) {
  historyNftItem(address: $address, first: $first, after: $after) {
    cursor
    items { createdAt }
  }
}";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedItemsVars<'a> {
    pub owner_address: &'a str,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryVars<'a> {
    pub address: &'a str,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Common connection shape: a cursor and a list of nodes.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub cursor: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedItemsData {
    pub nft_items_by_owner: Connection<ItemNode>,
}

#[derive(Debug, Deserialize)]
pub struct ItemNode {
    #[serde(default)]
    pub name: String,
    pub address: String,
    pub collection: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    pub history_nft_item: Connection<HistoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryNode {
    pub created_at: i64,
}
