//! tonapi adapter: DNS resolution and item get-methods.

pub mod boc;
pub mod client;
pub mod gateway;
pub mod types;

pub use client::{TonapiClient, TonapiClientConfig};
pub use gateway::TonapiGateway;
