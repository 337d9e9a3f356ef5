//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;
use valet_core::{
  clock::ManualClock,
  ledger::TicketLedger,
  store::{Collection, TicketStore},
  ticket::{NewTicket, Ticket, TicketStatus},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn entry_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
}

fn active_ticket(name: &str) -> Ticket {
  Ticket {
    id:             Uuid::new_v4(),
    parking_name:   name.into(),
    price_per_hour: 100,
    entry_time:     entry_time(),
    status:         TicketStatus::Active,
    exit_time:      None,
    total_amount:   None,
  }
}

fn closed_ticket(name: &str) -> Ticket {
  Ticket {
    status: TicketStatus::Closed,
    exit_time: Some(entry_time() + Duration::minutes(90)),
    total_amount: Some(200),
    ..active_ticket(name)
  }
}

// ─── Key-value contract ──────────────────────────────────────────────────────

#[tokio::test]
async fn absent_key_reads_as_empty() {
  let s = store().await;
  assert!(s.get(Collection::Active).await.unwrap().is_empty());
  assert!(s.get(Collection::History).await.unwrap().is_empty());
}

#[tokio::test]
async fn round_trip_preserves_flat_records() {
  let s = store().await;
  let active = vec![active_ticket("Central lot"), active_ticket("Harbour lot")];
  let history = vec![closed_ticket("Station north")];

  s.set(Collection::Active, active.clone()).await.unwrap();
  s.set(Collection::History, history.clone()).await.unwrap();

  let read_active = s.get(Collection::Active).await.unwrap();
  let read_history = s.get(Collection::History).await.unwrap();

  // Field for field, order preserved.
  assert_eq!(read_active, active);
  assert_eq!(read_history, history);

  // Optional fields stayed absent on active, present on closed.
  assert!(read_active.iter().all(|t| t.exit_time.is_none()));
  assert!(read_active.iter().all(|t| t.total_amount.is_none()));
  assert!(read_history[0].exit_time.is_some());
  assert!(read_history[0].total_amount.is_some());
}

#[tokio::test]
async fn set_overwrites_the_whole_sequence() {
  let s = store().await;
  s.set(
    Collection::Active,
    vec![active_ticket("Central lot"), active_ticket("Harbour lot")],
  )
  .await
  .unwrap();
  s.set(Collection::Active, vec![active_ticket("Station north")])
    .await
    .unwrap();

  let active = s.get(Collection::Active).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].parking_name, "Station north");
}

#[tokio::test]
async fn replace_commits_both_collections() {
  let s = store().await;
  let stays = active_ticket("Central lot");
  let leaves = closed_ticket("Harbour lot");
  s.set(Collection::Active, vec![stays.clone()]).await.unwrap();

  s.replace(vec![stays.clone()], vec![leaves.clone()])
    .await
    .unwrap();

  assert_eq!(s.get(Collection::Active).await.unwrap(), vec![stays]);
  assert_eq!(s.get(Collection::History).await.unwrap(), vec![leaves]);
}

#[tokio::test]
async fn reopening_the_file_keeps_the_data() {
  let path = std::env::temp_dir()
    .join(format!("valet-test-{}.db", Uuid::new_v4().simple()));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.set(Collection::Active, vec![active_ticket("Central lot")])
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let active = s.get(Collection::Active).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].parking_name, "Central lot");

  std::fs::remove_file(&path).ok();
}

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_lifecycle_against_sqlite() {
  let clock = Arc::new(ManualClock::at(entry_time()));
  let ledger = TicketLedger::new(store().await, clock.clone());

  let ticket = ledger
    .open(NewTicket {
      parking_name:   "Central lot".into(),
      price_per_hour: 100,
    })
    .await
    .unwrap();

  // 61 minutes in, the live amount reflects two started hours.
  clock.advance(Duration::minutes(61));
  let live = ledger.get_active(ticket.id).await.unwrap().unwrap();
  assert_eq!(live.amount_due(ledger.now()), 200);

  let closed = ledger.close(ticket.id).await.unwrap();
  assert_eq!(closed.total_amount, Some(200));
  assert_eq!(closed.exit_time, Some(ledger.now()));

  // Exactly once in history, gone from active.
  let history = ledger.history().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0], closed);
  assert!(ledger.active().await.unwrap().is_empty());
  assert_eq!(ledger.get_active(ticket.id).await.unwrap(), None);

  // A second close finds nothing to close.
  assert!(matches!(
    ledger.close(ticket.id).await.unwrap_err(),
    valet_core::Error::TicketNotFound(_)
  ));
  assert_eq!(ledger.history().await.unwrap().len(), 1);

  // Delete clears history; a repeat delete is a quiet no-op.
  ledger.delete(ticket.id).await.unwrap();
  assert!(ledger.history().await.unwrap().is_empty());
  ledger.delete(ticket.id).await.unwrap();
}
