//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ChainGateway`: DNS resolution and item get-methods on TON
//! - `ItemFeed`: Paginated NFT ownership and history from an indexer
//! - `WalletTransactor`: Renew/assign transactions from the owner wallet

pub mod chain_gateway;
pub mod item_feed;
pub mod wallet;

pub use chain_gateway::ChainGateway;
pub use item_feed::{HistoryEvent, ItemFeed, OwnedItem, Page};
pub use wallet::WalletTransactor;
