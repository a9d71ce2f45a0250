//! Configuration Module - TOML File, Environment and Flags
//!
//! Static settings (endpoints, signer, fee) come from an optional
//! `tondns.toml`; per-run switches (lite, renew, threshold, ...) come from
//! command-line flags or their `TONDNS_*` environment fallbacks. Both are
//! merged once at startup into a `RunSettings` value that is passed into
//! the constructors; nothing reads configuration ambiently afterwards.

pub mod duration;
pub mod loader;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Address, DNS_COLLECTION, RenewalFee, RenewalPolicy};

/// Contents of `tondns.toml`. Every key has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
  pub network: NetworkConfig,
  pub wallet: WalletConfig,
  pub renewal: RenewalConfig,
}

/// Remote endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
  /// tonapi REST base URL (chain reads and DNS resolution).
  pub tonapi_url: String,
  /// Optional tonapi bearer key; raises the rate limit.
  pub tonapi_key: Option<String>,
  /// Requests per second allowed against tonapi.
  pub rate_limit_rps: u32,
  /// Attempts per chain request, including the first.
  pub max_attempts: u32,
  /// getgems GraphQL endpoint (ownership and history).
  pub gems_url: String,
  /// HTTP or SOCKS5 proxy for indexer requests.
  pub proxy: Option<String>,
  /// Per-request timeout.
  pub timeout_seconds: u64,
  /// DNS collection whose items are tracked.
  pub collection_address: String,
}

impl Default for NetworkConfig {
  fn default() -> Self {
    Self {
      tonapi_url: "https://tonapi.io".to_string(),
      tonapi_key: None,
      rate_limit_rps: 1,
      max_attempts: 3,
      gems_url: "https://api.getgems.io/graphql".to_string(),
      proxy: None,
      timeout_seconds: 30,
      collection_address: DNS_COLLECTION.to_string(),
    }
  }
}

/// External signer holding the wallet keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
  pub signer_url: String,
  pub version: WalletVersion,
}

impl Default for WalletConfig {
  fn default() -> Self {
    Self {
      signer_url: "http://127.0.0.1:8081".to_string(),
      version: WalletVersion::V5R1,
    }
  }
}

/// Renewal transaction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenewalConfig {
  /// Amount in TON attached to renew/assign transactions.
  pub renew_amount: String,
  /// Cap on concurrently checked domains; unbounded when absent.
  pub max_concurrency: Option<usize>,
}

impl Default for RenewalConfig {
  fn default() -> Self {
    Self {
      renew_amount: "0.005".to_string(),
      max_concurrency: None,
    }
  }
}

/// Wallet contract versions understood by the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum WalletVersion {
  V1R1,
  V1R2,
  V1R3,
  V2R1,
  V2R2,
  V3R1,
  V3R2,
  V4R1,
  V4R2,
  HighloadV2R2,
  HighloadV2Verified,
  HighloadV3,
  V5R1Beta,
  V5R1Final,
  /// Alias of `V5R1Final`.
  V5R1,
}

impl WalletVersion {
  const ALL: [(&'static str, Self); 15] = [
    ("v1r1", Self::V1R1),
    ("v1r2", Self::V1R2),
    ("v1r3", Self::V1R3),
    ("v2r1", Self::V2R1),
    ("v2r2", Self::V2R2),
    ("v3r1", Self::V3R1),
    ("v3r2", Self::V3R2),
    ("v4r1", Self::V4R1),
    ("v4r2", Self::V4R2),
    ("highloadv2r2", Self::HighloadV2R2),
    ("highloadv2verified", Self::HighloadV2Verified),
    ("highloadv3", Self::HighloadV3),
    ("v5r1beta", Self::V5R1Beta),
    ("v5r1final", Self::V5R1Final),
    ("v5r1", Self::V5R1),
  ];

  pub fn as_str(self) -> &'static str {
    Self::ALL
      .iter()
      .find(|(_, v)| *v == self)
      .map_or("v5r1", |(name, _)| name)
  }
}

impl FromStr for WalletVersion {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase();
    Self::ALL
      .iter()
      .find(|(name, _)| *name == wanted)
      .map(|(_, v)| *v)
      .ok_or_else(|| {
        let names: Vec<&str> = Self::ALL.iter().map(|(name, _)| *name).collect();
        format!("must be one of {}", names.join(", "))
      })
  }
}

impl TryFrom<String> for WalletVersion {
  type Error = String;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl fmt::Display for WalletVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Where the JSON report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
  Stdout,
  File(PathBuf),
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
  pub network: NetworkConfig,
  pub wallet: WalletConfig,
  /// Mnemonic words; empty in lite mode.
  pub mnemonic: Vec<String>,
  pub policy: RenewalPolicy,
  pub fee: RenewalFee,
  pub collection: Address,
  pub max_concurrency: Option<usize>,
  /// Pause between paginated indexer requests.
  pub query_delay: Duration,
  pub pretty: bool,
  pub output: OutputTarget,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wallet_version_parsing() {
    assert_eq!("V4R2".parse::<WalletVersion>().unwrap(), WalletVersion::V4R2);
    assert_eq!("v5r1".parse::<WalletVersion>().unwrap(), WalletVersion::V5R1);
    assert_eq!(WalletVersion::HighloadV3.to_string(), "highloadv3");
    let err = "v9".parse::<WalletVersion>().unwrap_err();
    assert!(err.starts_with("must be one of v1r1"));
  }

  #[test]
  fn test_defaults_from_empty_toml() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config.network.rate_limit_rps, 1);
    assert_eq!(config.network.collection_address, DNS_COLLECTION);
    assert_eq!(config.wallet.version, WalletVersion::V5R1);
    assert_eq!(config.renewal.renew_amount, "0.005");
  }

  #[test]
  fn test_partial_toml_overrides() {
    let config: AppConfig = toml::from_str(
      r#"
        [network]
        tonapi_key = "secret"
        rate_limit_rps = 10

        [wallet]
        version = "v4r2"

        [renewal]
        max_concurrency = 8
      "#,
    )
    .unwrap();
    assert_eq!(config.network.tonapi_key.as_deref(), Some("secret"));
    assert_eq!(config.network.rate_limit_rps, 10);
    assert_eq!(config.network.gems_url, "https://api.getgems.io/graphql");
    assert_eq!(config.wallet.version, WalletVersion::V4R2);
    assert_eq!(config.renewal.max_concurrency, Some(8));
  }
}
