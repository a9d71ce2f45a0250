//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies. Each sub-module groups adapters by the service
//! they talk to.
//!
//! Adapter categories:
//! - `tonapi`: DNS resolution and item get-methods (`ChainGateway`)
//! - `gems`: getgems GraphQL ownership and history (`ItemFeed`)
//! - `signer`: Renew/assign transactions via a signer service (`WalletTransactor`)
//! - `output`: JSON report to stdout or a file

pub mod gems;
pub mod output;
pub mod signer;
pub mod tonapi;
