//! Signer Wallet - `WalletTransactor` backed by an external signer
//!
//! Key derivation, seqno handling and signing happen in a local signer
//! service. This adapter only tells it what to send: a comment transfer
//! for renewals, or the set-wallet-record payload for assignments.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use super::types::{
    SET_WALLET_RECORD_PAYLOAD, TransferRequest, TransferResponse, WalletRequest, WalletResponse,
};
use crate::config::{NetworkConfig, WalletConfig};
use crate::domain::{Address, RenewalFee};
use crate::ports::WalletTransactor;

/// Confirmation can take several blocks.
const WAIT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct SignerWallet {
    http: Client,
    base_url: String,
    mnemonic: Vec<String>,
    version: String,
    address: Address,
}

impl SignerWallet {
    /// Open the wallet described by `mnemonic` and cache its address.
    ///
    /// # Errors
    /// Fails when the signer is unreachable or rejects the mnemonic.
    pub async fn connect(
        config: &WalletConfig,
        network: &NetworkConfig,
        mnemonic: Vec<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(network.timeout_seconds).max(WAIT_TIMEOUT))
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = config.signer_url.trim_end_matches('/').to_string();
        let version = config.version.to_string();

        let response: WalletResponse = post(
            &http,
            &format!("{base_url}/v1/wallet"),
            &WalletRequest {
                mnemonic: &mnemonic,
                version: &version,
            },
        )
        .await
        .context("failed to open wallet")?;

        let address: Address = response
            .address
            .parse()
            .context("signer returned an invalid wallet address")?;
        info!(wallet = %address, version = %version, "Wallet opened");

        Ok(Self {
            http,
            base_url,
            mnemonic,
            version,
            address,
        })
    }

    async fn send(
        &self,
        item: &Address,
        fee: RenewalFee,
        comment: Option<&str>,
        payload: Option<&str>,
        wait: bool,
    ) -> Result<()> {
        let response: TransferResponse = post(
            &self.http,
            &format!("{}/v1/transfer", self.base_url),
            &TransferRequest {
                mnemonic: &self.mnemonic,
                version: &self.version,
                destination: item.to_string(),
                amount_nano: fee.nanotons().to_string(),
                comment,
                payload,
                wait,
            },
        )
        .await?;

        info!(
            item = %item,
            amount = %fee,
            hash = response.hash.as_deref().unwrap_or("-"),
            "Transaction sent"
        );
        Ok(())
    }
}

async fn post<B: Serialize + Sync, T: DeserializeOwned>(
    http: &Client,
    url: &str,
    body: &B,
) -> Result<T> {
    let response = http
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("signer request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        bail!("signer error {status}: {text}");
    }
    response
        .json()
        .await
        .context("Failed to decode signer response")
}

#[async_trait]
impl WalletTransactor for SignerWallet {
    fn address(&self) -> &Address {
        &self.address
    }

    #[instrument(skip(self), fields(item = %item, fee = %fee))]
    async fn assign(&self, item: &Address, fee: RenewalFee, wait: bool) -> Result<()> {
        self.send(item, fee, None, Some(SET_WALLET_RECORD_PAYLOAD), wait)
            .await
    }

    #[instrument(skip(self), fields(item = %item, fee = %fee))]
    async fn transfer(
        &self,
        item: &Address,
        fee: RenewalFee,
        comment: &str,
        wait: bool,
    ) -> Result<()> {
        self.send(item, fee, Some(comment), None, wait).await
    }
}
