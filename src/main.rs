//! TON DNS Renewal Checker - Entry Point
//!
//! Wiring sequence:
//! 1. Parse flags, init tracing (stderr; stdout carries the report)
//! 2. Load tondns.toml, merge flags, validate
//! 3. Validate domain arguments before any network I/O
//! 4. Create tonapi gateway and getgems feed
//! 5. Unless lite: open the wallet and build its ownership index
//! 6. Run the batch and write the JSON report

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tondns::adapters::gems::{GemsClient, GemsFeed};
use tondns::adapters::output;
use tondns::adapters::signer::SignerWallet;
use tondns::adapters::tonapi::{TonapiClient, TonapiGateway};
use tondns::cli::Cli;
use tondns::config::loader::{load_config, resolve_settings};
use tondns::domain::{CheckError, OwnershipIndex, validate_domain_name};
use tondns::ports::WalletTransactor;
use tondns::usecases::{BatchRunner, CheckerSettings, DomainChecker, build_index};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", fatal_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// One stderr line for a fatal error, with its whole context chain.
fn fatal_message(error: &anyhow::Error) -> String {
    format!("Error: {error:#}")
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── 1. Configuration ────────────────────────────────────
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let settings = resolve_settings(config, cli.run_flags())?;
    let lite = settings.policy.lite;

    // ── 2. Input validation (no I/O yet) ────────────────────
    for name in &cli.domains {
        validate_domain_name(name)?;
    }
    if lite && cli.domains.is_empty() {
        return Err(CheckError::LiteCheckAll.into());
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        domains = cli.domains.len(),
        lite,
        renew = settings.policy.renew,
        force = settings.policy.force,
        fee = %settings.fee,
        "Starting TON DNS checker"
    );

    // ── 3. Chain gateway and indexer feed ───────────────────
    let gateway = TonapiGateway::new(
        TonapiClient::new((&settings.network).into()).context("Failed to create tonapi client")?,
    );
    let feed = GemsFeed::new(
        GemsClient::new(&settings.network).context("Failed to create getgems client")?,
    );

    // ── 4. Wallet and ownership index ───────────────────────
    let (wallet, index) = if lite {
        (None, OwnershipIndex::empty())
    } else {
        let wallet = SignerWallet::connect(&settings.wallet, &settings.network, settings.mnemonic)
            .await
            .context("Failed to open wallet")?;
        let index = build_index(
            &feed,
            wallet.address(),
            &settings.collection,
            settings.query_delay,
        )
        .await
        .context("Failed to build ownership index")?;
        (Some(wallet), index)
    };

    let checker = DomainChecker::new(
        gateway,
        feed,
        wallet,
        Arc::new(index),
        CheckerSettings {
            policy: settings.policy,
            fee: settings.fee,
            collection: settings.collection,
            query_delay: settings.query_delay,
        },
    )?;
    let runner = BatchRunner::new(Arc::new(checker)).with_max_concurrency(settings.max_concurrency);

    // ── 5. Batch and report ─────────────────────────────────
    let results = if cli.domains.is_empty() {
        runner.check_all().await?
    } else {
        runner.check_domains(&cli.domains).await?
    };

    output::emit(&results, settings.pretty, &settings.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_message_is_single_line_with_context() {
        let err = anyhow::anyhow!("seed is empty").context("Failed to load configuration");
        assert_eq!(
            fatal_message(&err),
            "Error: Failed to load configuration: seed is empty"
        );
    }

    #[test]
    fn test_fatal_message_for_typed_errors() {
        let err: anyhow::Error = CheckError::LiteCheckAll.into();
        assert_eq!(
            fatal_message(&err),
            "Error: lite mode doesn't support check all mode"
        );
    }
}
