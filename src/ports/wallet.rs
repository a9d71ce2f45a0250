//! Wallet Transactor Port - Signed Transactions from the Owner Wallet
//!
//! Key derivation and signing stay behind this trait. The checker only
//! decides *which* of the two transactions to send and to which item.

use async_trait::async_trait;

use crate::domain::{Address, RenewalFee};

#[async_trait]
pub trait WalletTransactor: Send + Sync + 'static {
  /// Address of the wallet that signs transactions.
  fn address(&self) -> &Address;

  /// Send a set-wallet-record message carrying `fee` to a DNS item,
  /// making this wallet the domain's record owner.
  ///
  /// With `wait` set, returns only after the transaction is confirmed.
  async fn assign(&self, item: &Address, fee: RenewalFee, wait: bool) -> anyhow::Result<()>;

  /// Plain transfer of `fee` to a DNS item with a text comment.
  async fn transfer(
    &self,
    item: &Address,
    fee: RenewalFee,
    comment: &str,
    wait: bool,
  ) -> anyhow::Result<()>;
}
