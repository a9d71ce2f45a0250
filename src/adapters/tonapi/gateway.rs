//! `ChainGateway` over tonapi.
//!
//! DNS names resolve through `/v2/dns/{name}`; item get-methods run through
//! `/v2/blockchain/accounts/{address}/methods/{method}`.

use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use super::boc::read_address_hex;
use super::client::TonapiClient;
use super::types::{DomainInfo, MethodExecutionResult, StackEntry};
use crate::domain::{Address, validate_domain_name};
use crate::ports::ChainGateway;
use crate::ports::chain_gateway::{METHOD_LAST_FILL_UP_TIME, METHOD_NFT_DATA};

/// Stack slot of the owner address in `get_nft_data`.
const NFT_DATA_OWNER_SLOT: usize = 3;

pub struct TonapiGateway {
    client: TonapiClient,
}

impl TonapiGateway {
    pub const fn new(client: TonapiClient) -> Self {
        Self { client }
    }

    async fn run_method(&self, item: &Address, method: &str) -> Result<Vec<StackEntry>> {
        let path = format!(
            "/v2/blockchain/accounts/{}/methods/{method}",
            item.to_raw()
        );
        let result: MethodExecutionResult = self.client.get_json(&path).await?;
        ensure!(
            result.success,
            "{method} on {item} exited with code {}",
            result.exit_code
        );
        Ok(result.stack)
    }
}

/// Parse a tonapi stack number (`0x..`, `-0x..` or decimal).
pub(crate) fn parse_stack_num(raw: &str) -> Result<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let value = match digits.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse(),
    }
    .with_context(|| format!("invalid stack number {raw:?}"))?;
    Ok(if negative { -value } else { value })
}

fn entry_boc(entry: &StackEntry) -> Option<&str> {
    entry.cell.as_deref().or(entry.slice.as_deref())
}

#[async_trait]
impl ChainGateway for TonapiGateway {
    #[instrument(skip(self))]
    async fn resolve_domain(&self, name: &str) -> Result<Address> {
        validate_domain_name(name)?;

        let info: DomainInfo = self.client.get_json(&format!("/v2/dns/{name}")).await?;
        let Some(item) = info.item else {
            bail!("domain {name} has no NFT item");
        };
        Ok(item.address.parse()?)
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn last_fill_up_time(&self, item: &Address) -> Result<DateTime<Utc>> {
        let stack = self.run_method(item, METHOD_LAST_FILL_UP_TIME).await?;
        let raw = stack
            .first()
            .and_then(|entry| entry.num.as_deref())
            .with_context(|| format!("{METHOD_LAST_FILL_UP_TIME} returned no number"))?;
        let secs = parse_stack_num(raw)?;
        DateTime::from_timestamp(secs, 0).with_context(|| format!("timestamp {secs} out of range"))
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn item_owner(&self, item: &Address) -> Result<Address> {
        let stack = self.run_method(item, METHOD_NFT_DATA).await?;
        let boc = stack
            .get(NFT_DATA_OWNER_SLOT)
            .and_then(entry_boc)
            .with_context(|| format!("{METHOD_NFT_DATA} returned no owner slot"))?;
        read_address_hex(boc).context("failed to decode owner address")
    }
}
