//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain rules with the port interfaces.
//!
//! Use cases:
//! - `ownership_index`: Build the wallet's name → item index once per run
//! - `history`: Derive a domain's mint date from its item history
//! - `checker`: Evaluate one domain and renew it when the policy says so
//! - `batch`: Fan many domains out to the checker concurrently

pub mod batch;
pub mod checker;
pub mod history;
pub mod ownership_index;

pub use batch::BatchRunner;
pub use checker::{CheckerSettings, DomainChecker};
pub use ownership_index::build_index;
