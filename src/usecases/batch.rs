//! Batch Runner Use Case - Concurrent Evaluation of Many Domains
//!
//! Fans a set of domains out to the checker, one tokio task per domain,
//! and collects every result into a shared list. Results come back in
//! completion order. For N inputs exactly N results are returned: a
//! failing or panicking task contributes an error result for its domain
//! and never disturbs its siblings.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::{Mutex, Semaphore};
use tracing::{error, info, instrument};

use super::checker::DomainChecker;
use crate::domain::{CheckError, CheckResult, DomainItem, validate_domain_name};
use crate::ports::{ChainGateway, ItemFeed, WalletTransactor};

/// What a single task evaluates.
enum Job {
  /// A name supplied by the operator.
  Name(String),
  /// An item from the ownership index, evaluated as the wallet's own.
  Owned(DomainItem),
}

impl Job {
  fn domain_name(&self) -> &str {
    match self {
      Self::Name(name) => name,
      Self::Owned(item) => &item.name,
    }
  }
}

/// Runs domain checks concurrently.
pub struct BatchRunner<G, F, W> {
  checker: Arc<DomainChecker<G, F, W>>,
  /// Optional cap on in-flight checks; `None` spawns everything at once.
  max_concurrency: Option<usize>,
}

impl<G, F, W> BatchRunner<G, F, W>
where
  G: ChainGateway,
  F: ItemFeed,
  W: WalletTransactor,
{
  pub fn new(checker: Arc<DomainChecker<G, F, W>>) -> Self {
    Self {
      checker,
      max_concurrency: None,
    }
  }

  /// Limit the number of domains checked at the same time.
  #[must_use]
  pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
    self.max_concurrency = limit.filter(|&n| n > 0);
    self
  }

  /// Check an explicit list of domains.
  ///
  /// # Errors
  /// `InvalidDomain` for the first name without the TLD suffix; nothing is
  /// checked in that case.
  #[instrument(skip_all, fields(domains = names.len()))]
  pub async fn check_domains(&self, names: &[String]) -> Result<Vec<CheckResult>, CheckError> {
    for name in names {
      validate_domain_name(name)?;
    }

    let jobs = names.iter().cloned().map(Job::Name).collect();
    Ok(self.run(jobs).await)
  }

  /// Check every domain in the ownership index.
  ///
  /// # Errors
  /// `LiteCheckAll` in lite mode, before any request is made.
  #[instrument(skip_all)]
  pub async fn check_all(&self) -> Result<Vec<CheckResult>, CheckError> {
    if self.checker.policy().lite {
      return Err(CheckError::LiteCheckAll);
    }

    let jobs = self.checker.index().iter().cloned().map(Job::Owned).collect();
    Ok(self.run(jobs).await)
  }

  async fn run(&self, jobs: Vec<Job>) -> Vec<CheckResult> {
    let total = jobs.len();
    let results = Arc::new(Mutex::new(Vec::with_capacity(total)));
    let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

    let mut names = Vec::with_capacity(total);
    let mut handles = Vec::with_capacity(total);

    for job in jobs {
      names.push(job.domain_name().to_string());

      let checker = Arc::clone(&self.checker);
      let results = Arc::clone(&results);
      let semaphore = semaphore.clone();

      handles.push(tokio::spawn(async move {
        let _permit = match semaphore {
          Some(semaphore) => semaphore.acquire_owned().await.ok(),
          None => None,
        };

        let result = match job {
          Job::Name(name) => checker.evaluate(&name).await,
          Job::Owned(item) => checker.evaluate_item(&item, true).await,
        };

        results.lock().await.push(result);
      }));
    }

    for (name, outcome) in names.into_iter().zip(join_all(handles).await) {
      if let Err(e) = outcome {
        error!(domain = %name, error = %e, "Check task aborted");
        results
          .lock()
          .await
          .push(CheckResult::failed(name, format!("check task aborted: {e}")));
      }
    }

    let results = match Arc::try_unwrap(results) {
      Ok(results) => results.into_inner(),
      Err(shared) => shared.lock().await.clone(),
    };

    let failed = results.iter().filter(|r| r.is_error()).count();
    info!(total, failed, "Batch complete");

    results
  }
}
