//! Item history: derives the mint date of a domain.
//!
//! The indexer lists events newest-first, so the creation event is the
//! last one. The minimum timestamp over the whole history is used, which
//! is the same event under that ordering and stays correct if it changes.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::time::sleep;

use super::ownership_index::PAGE_SIZE;
use crate::domain::Address;
use crate::ports::ItemFeed;

/// Fetch the complete history of `item` and return its earliest event time.
pub async fn mint_date<F: ItemFeed + ?Sized>(
  feed: &F,
  item: &Address,
  delay: Duration,
) -> Result<DateTime<Utc>> {
  let mut earliest: Option<i64> = None;
  let mut cursor: Option<String> = None;

  loop {
    let page = feed
      .history_page(item, PAGE_SIZE, cursor.take())
      .await
      .context("failed to load item history")?;

    if let Some(oldest) = page.items.iter().map(|e| e.created_at).min() {
      earliest = Some(earliest.map_or(oldest, |e| e.min(oldest)));
    }

    match page.next_cursor {
      Some(next) => cursor = Some(next),
      None => break,
    }

    sleep(delay).await;
  }

  let created_at = earliest.context("item has no history events")?;
  DateTime::from_timestamp(created_at, 0)
    .with_context(|| format!("history timestamp {created_at} out of range"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ports::{HistoryEvent, OwnedItem, Page};
  use async_trait::async_trait;
  use std::sync::Mutex;

  struct HistoryFeed(Mutex<Vec<Page<HistoryEvent>>>);

  #[async_trait]
  impl ItemFeed for HistoryFeed {
    async fn owned_items_page(
      &self,
      _owner: &Address,
      _first: u32,
      _after: Option<String>,
    ) -> Result<Page<OwnedItem>> {
      unreachable!()
    }

    async fn history_page(
      &self,
      _item: &Address,
      _first: u32,
      _after: Option<String>,
    ) -> Result<Page<HistoryEvent>> {
      Ok(self.0.lock().unwrap().remove(0))
    }
  }

  fn events(times: &[i64]) -> Vec<HistoryEvent> {
    times.iter().map(|&created_at| HistoryEvent { created_at }).collect()
  }

  #[tokio::test]
  async fn test_mint_date_is_oldest_event_across_pages() {
    let feed = HistoryFeed(Mutex::new(vec![
      Page::with_cursor(events(&[1_700_000_300, 1_700_000_200]), "next"),
      Page::last(events(&[1_700_000_100])),
    ]));

    let mint = mint_date(&feed, &Address::new(0, [1; 32]), Duration::ZERO)
      .await
      .unwrap();
    assert_eq!(mint.timestamp(), 1_700_000_100);
  }

  #[tokio::test]
  async fn test_empty_history_is_an_error() {
    let feed = HistoryFeed(Mutex::new(vec![Page::last(Vec::new())]));
    let err = mint_date(&feed, &Address::new(0, [1; 32]), Duration::ZERO)
      .await
      .unwrap_err();
    assert!(err.to_string().contains("no history"));
  }

  #[tokio::test(start_paused = true)]
  async fn test_history_pages_are_paced() {
    let feed = HistoryFeed(Mutex::new(vec![
      Page::with_cursor(events(&[1_700_000_300]), "p2"),
      Page::with_cursor(events(&[1_700_000_200]), "p3"),
      Page::last(events(&[1_700_000_100])),
    ]));

    let start = tokio::time::Instant::now();
    let mint = mint_date(&feed, &Address::new(0, [1; 32]), Duration::from_millis(100))
      .await
      .unwrap();

    assert_eq!(mint.timestamp(), 1_700_000_100);
    assert_eq!(start.elapsed(), Duration::from_millis(200));
  }
}
