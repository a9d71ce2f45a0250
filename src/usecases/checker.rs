//! Domain Checker Use Case - Expiration Judgment and Renewal
//!
//! Evaluates one domain end to end: locate its item (ownership index or
//! on-chain resolution), load mint date, last fill-up and current owner,
//! derive the expiration facts, apply the renewal policy and, when the
//! policy says so, send the renew or assign transaction.
//!
//! Every failure is contained in the returned `CheckResult`; evaluating one
//! domain never affects another.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::history;
use crate::domain::{
  Address, CheckError, CheckResult, DomainItem, ExpirationFacts, OwnershipIndex, RENEW_COMMENT,
  RenewalAction, RenewalFee, RenewalPolicy,
};
use crate::ports::{ChainGateway, ItemFeed, WalletTransactor};

/// Run-wide settings for the checker, built once from configuration.
#[derive(Debug, Clone)]
pub struct CheckerSettings {
  pub policy: RenewalPolicy,
  pub fee: RenewalFee,
  /// DNS collection that resolved domains belong to.
  pub collection: Address,
  /// Pause between paginated indexer requests.
  pub query_delay: Duration,
}

/// Evaluates domains against the renewal policy.
pub struct DomainChecker<G, F, W> {
  gateway: G,
  feed: F,
  wallet: Option<W>,
  index: Arc<OwnershipIndex>,
  settings: CheckerSettings,
}

impl<G, F, W> DomainChecker<G, F, W>
where
  G: ChainGateway,
  F: ItemFeed,
  W: WalletTransactor,
{
  /// Create a checker.
  ///
  /// # Errors
  /// `MissingWallet` when the policy is not lite but no wallet is given;
  /// `Config` when a wallet is given in lite mode.
  pub fn new(
    gateway: G,
    feed: F,
    wallet: Option<W>,
    index: Arc<OwnershipIndex>,
    settings: CheckerSettings,
  ) -> Result<Self, CheckError> {
    match (settings.policy.lite, wallet.is_some()) {
      (false, false) => return Err(CheckError::MissingWallet),
      (true, true) => {
        return Err(CheckError::Config(
          "lite mode runs without a wallet".to_string(),
        ));
      }
      _ => {}
    }

    Ok(Self {
      gateway,
      feed,
      wallet,
      index,
      settings,
    })
  }

  pub const fn policy(&self) -> &RenewalPolicy {
    &self.settings.policy
  }

  pub fn index(&self) -> &OwnershipIndex {
    &self.index
  }

  #[cfg(test)]
  pub(crate) const fn gateway(&self) -> &G {
    &self.gateway
  }

  /// Evaluate a domain by name.
  ///
  /// Names found in the ownership index are treated as the wallet's own;
  /// anything else is resolved on-chain and reported with `isMine = false`.
  #[instrument(skip(self))]
  pub async fn evaluate(&self, name: &str) -> CheckResult {
    if let Some(item) = self.index.get(name) {
      return self.evaluate_item(item, true).await;
    }

    let address = match self.gateway.resolve_domain(name).await {
      Ok(address) => address,
      Err(e) => {
        warn!(domain = name, error = %e, "Domain resolution failed");
        return CheckResult::failed(name, format!("{e:#}"));
      }
    };

    let item = DomainItem {
      name: name.to_string(),
      address,
      collection_address: self.settings.collection,
    };
    self.evaluate_item(&item, false).await
  }

  /// Evaluate an already located item.
  pub async fn evaluate_item(&self, item: &DomainItem, is_mine: bool) -> CheckResult {
    match self.try_evaluate(item, is_mine).await {
      Ok(result) => result,
      Err(e) => {
        warn!(domain = %item.name, error = %e, "Domain check failed");
        CheckResult::failed(item.name.clone(), format!("{e:#}"))
      }
    }
  }

  async fn try_evaluate(&self, item: &DomainItem, is_mine: bool) -> Result<CheckResult> {
    let mint_date = history::mint_date(&self.feed, &item.address, self.settings.query_delay).await?;
    let last_fill_up = self
      .gateway
      .last_fill_up_time(&item.address)
      .await
      .context("failed to read last fill-up time")?;
    let owner = self
      .gateway
      .item_owner(&item.address)
      .await
      .context("failed to read item owner")?;

    let is_assigned = self
      .wallet
      .as_ref()
      .is_some_and(|wallet| *wallet.address() == owner);
    let facts = ExpirationFacts::derive(
      mint_date,
      last_fill_up,
      Utc::now(),
      self.settings.policy.threshold,
    );

    let mut result =
      CheckResult::from_facts(&item.name, &item.address, &owner, &facts, is_assigned, is_mine);

    let action = self
      .settings
      .policy
      .decide(is_mine, is_assigned, facts.is_need_to_renew);

    info!(
      domain = %item.name,
      days_to_expire = facts.days_to_expire,
      need_to_renew = facts.is_need_to_renew,
      is_mine,
      is_assigned,
      action = ?action,
      "Domain evaluated"
    );

    let wallet = match (action, self.wallet.as_ref()) {
      (RenewalAction::None, _) => return Ok(result),
      (_, Some(wallet)) => wallet,
      (_, None) => return Err(CheckError::MissingWallet.into()),
    };
    let fee = self.settings.fee;
    let wait = self.settings.policy.wait_for_confirmation;

    if action == RenewalAction::Assign {
      wallet
        .assign(&item.address, fee, wait)
        .await
        .context("assign transaction failed")?;
      result.is_assigned = true;
    } else {
      wallet
        .transfer(&item.address, fee, RENEW_COMMENT, wait)
        .await
        .context("renew transfer failed")?;
    }

    result.has_renewed_now = true;
    result.renewal_amount = fee.nanotons();
    info!(domain = %item.name, action = ?action, fee = %fee, wait, "Renewal submitted");

    Ok(result)
  }
}
