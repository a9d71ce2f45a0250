//! getgems adapter: wallet ownership and item history via GraphQL.

pub mod client;
pub mod feed;
pub mod types;

pub use client::GemsClient;
pub use feed::GemsFeed;
