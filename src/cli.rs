//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::WalletVersion;
use crate::config::loader::RunFlags;

#[derive(Parser, Debug)]
#[command(
    name = "tondns",
    about = "Check TON DNS domain expiration and renew domains before they expire",
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Domains to check; all domains owned by the wallet when empty
    pub domains: Vec<String>,

    /// Path to the TOML config file
    #[arg(long, env = "TONDNS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wallet seed phrase, words separated by spaces
    #[arg(short, long, env = "TONDNS_SEED", hide_env_values = true)]
    pub seed: Option<String>,

    /// Wallet contract version
    #[arg(long, env = "TONDNS_VERSION")]
    pub version: Option<WalletVersion>,

    /// HTTP or SOCKS5 proxy for indexer requests
    #[arg(long, env = "TONDNS_PROXY")]
    pub proxy: Option<String>,

    /// Read-only mode: no seed, no ownership lookup, no transactions
    #[arg(short, long, env = "TONDNS_LITE")]
    pub lite: bool,

    /// Wait for each transaction to be confirmed
    #[arg(long, env = "TONDNS_WAIT_TX")]
    pub wait_tx: bool,

    /// Delay between paginated indexer requests
    #[arg(long, env = "TONDNS_DELAY", default_value = "100ms")]
    pub delay: String,

    /// Renew domains expiring within the threshold
    #[arg(short, long, env = "TONDNS_RENEW")]
    pub renew: bool,

    /// Renew when less than this much time is left
    #[arg(long, env = "TONDNS_THRESHOLD", default_value = "720h")]
    pub threshold: String,

    /// Renew owned domains regardless of the threshold
    #[arg(long, env = "TONDNS_FORCE")]
    pub force: bool,

    /// Pretty-print the JSON report
    #[arg(short, long, env = "TONDNS_PRETTY")]
    pub pretty: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, env = "TONDNS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// The per-run switches handed to the config loader.
    pub fn run_flags(&self) -> RunFlags {
        RunFlags {
            seed: self.seed.iter().cloned().collect(),
            version: self.version,
            proxy: self.proxy.clone(),
            lite: self.lite,
            wait_tx: self.wait_tx,
            delay: self.delay.clone(),
            renew: self.renew,
            threshold: self.threshold.clone(),
            force: self.force,
            pretty: self.pretty,
            output: self.output.clone(),
        }
    }
}
