//! Configuration Loader - File Loading, Flag Merging and Validation
//!
//! Handles loading `tondns.toml`, merging the per-run flags on top of it,
//! and validating the result with clear error messages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::duration::parse_duration;
use super::{AppConfig, OutputTarget, RunSettings, WalletVersion};
use crate::domain::{Address, RenewalFee, RenewalPolicy};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tondns.toml";

/// Upper bound for `network.max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Per-run switches as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunFlags {
  /// Seed phrase; either one whitespace-separated string or separate words.
  pub seed: Vec<String>,
  pub version: Option<WalletVersion>,
  pub proxy: Option<String>,
  pub lite: bool,
  pub wait_tx: bool,
  pub delay: String,
  pub renew: bool,
  pub threshold: String,
  pub force: bool,
  pub pretty: bool,
  pub output: Option<PathBuf>,
}

/// Load configuration from a TOML file.
///
/// With an explicit `path` the file must exist. Without one,
/// `tondns.toml` in the working directory is used when present and the
/// built-in defaults otherwise.
///
/// # Errors
/// Returns detailed error if the file can't be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
  let path = match path {
    Some(path) => path,
    None => {
      let default = Path::new(DEFAULT_CONFIG_FILE);
      if !default.exists() {
        debug!("No config file, using defaults");
        return Ok(AppConfig::default());
      }
      default
    }
  };

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| format!("Failed to parse {}", path.display()))?;

  info!(path = %path.display(), "Configuration loaded");
  Ok(config)
}

/// Merge flags over the file configuration and validate the result.
///
/// # Errors
/// Returns an error when:
/// - the seed is missing outside lite mode
/// - a duration, amount or address doesn't parse
/// - numeric limits are zero or URLs are empty
pub fn resolve_settings(config: AppConfig, flags: RunFlags) -> Result<RunSettings> {
  let AppConfig {
    mut network,
    mut wallet,
    renewal,
  } = config;

  if let Some(proxy) = flags.proxy {
    network.proxy = Some(proxy);
  }
  if let Some(version) = flags.version {
    wallet.version = version;
  }

  let mnemonic: Vec<String> = if flags.lite {
    Vec::new()
  } else {
    flags
      .seed
      .iter()
      .flat_map(|chunk| chunk.split_whitespace())
      .map(str::to_string)
      .collect()
  };
  anyhow::ensure!(flags.lite || !mnemonic.is_empty(), "seed is empty");

  let query_delay = parse_duration(&flags.delay).context("Invalid --delay")?;
  let threshold = parse_duration(&flags.threshold).context("Invalid --threshold")?;
  let threshold = chrono::Duration::from_std(threshold).context("Threshold is too large")?;

  let fee = RenewalFee::from_ton(&renewal.renew_amount)?;
  let collection: Address = network
    .collection_address
    .parse()
    .context("Invalid network.collection_address")?;

  anyhow::ensure!(
    network.rate_limit_rps > 0,
    "network.rate_limit_rps must be positive"
  );
  anyhow::ensure!(
    (1..=MAX_ATTEMPTS_LIMIT).contains(&network.max_attempts),
    "network.max_attempts must be between 1 and {MAX_ATTEMPTS_LIMIT}"
  );
  anyhow::ensure!(!network.tonapi_url.is_empty(), "network.tonapi_url must not be empty");
  anyhow::ensure!(!network.gems_url.is_empty(), "network.gems_url must not be empty");
  anyhow::ensure!(
    flags.lite || !wallet.signer_url.is_empty(),
    "wallet.signer_url must not be empty"
  );
  if let Some(limit) = renewal.max_concurrency {
    anyhow::ensure!(limit > 0, "renewal.max_concurrency must be positive");
  }

  Ok(RunSettings {
    network,
    wallet,
    mnemonic,
    policy: RenewalPolicy {
      lite: flags.lite,
      renew: flags.renew,
      force: flags.force,
      threshold,
      wait_for_confirmation: flags.wait_tx,
    },
    fee,
    collection,
    max_concurrency: renewal.max_concurrency,
    query_delay,
    pretty: flags.pretty,
    output: flags
      .output
      .filter(|p| !p.as_os_str().is_empty())
      .map_or(OutputTarget::Stdout, OutputTarget::File),
  })
}
