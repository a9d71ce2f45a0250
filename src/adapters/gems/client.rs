//! getgems GraphQL Client
//!
//! Single POST endpoint; GraphQL-level errors are surfaced as request
//! errors even when the HTTP status is 200.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Proxy};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{GraphQlRequest, GraphQlResponse};
use crate::config::NetworkConfig;

pub struct GemsClient {
    http: Client,
    endpoint: String,
}

impl GemsClient {
    /// Build a client for `network.gems_url`, routed through
    /// `network.proxy` when set (`http://`, `https://` or `socks5://`).
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(network.timeout_seconds))
            .pool_max_idle_per_host(5);

        if let Some(proxy) = &network.proxy {
            let proxy = Proxy::all(proxy).with_context(|| format!("Invalid proxy {proxy}"))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build().context("Failed to build HTTP client")?,
            endpoint: network.gems_url.clone(),
        })
    }

    /// Run `query` with `variables` and return its `data`.
    pub async fn query<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        debug!(operation, "GraphQL request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .with_context(|| format!("{operation} request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("{operation}: getgems error {status}: {body}");
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {operation} response"))?;

        if let Some(first) = body.errors.first() {
            bail!("{operation}: {}", first.message);
        }
        body.data.ok_or_else(|| anyhow!("{operation}: empty response"))
    }
}
