//! Wallet adapter delegating signing to an external signer service.

pub mod types;
pub mod wallet;

pub use wallet::SignerWallet;
