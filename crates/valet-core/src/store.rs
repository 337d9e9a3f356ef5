//! The `TicketStore` trait — the key-value persistence contract.
//!
//! The trait is implemented by storage backends (e.g. `valet-store-sqlite`).
//! The ledger depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::ticket::Ticket;

// ─── Collections ─────────────────────────────────────────────────────────────

/// The two persisted ticket collections. Each maps to one key in the
/// backing key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  /// Tickets for vehicles still parked.
  Active,
  /// Closed tickets kept for record-keeping.
  History,
}

impl Collection {
  /// The stable storage key for this collection.
  pub fn key(self) -> &'static str {
    match self {
      Self::Active => "active_tickets",
      Self::History => "history_tickets",
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the ticket persistence backend.
///
/// The contract is a plain key-value store of ticket sequences: `get`
/// returns tickets in stored order (an absent key reads as empty), `set`
/// overwrites one whole sequence, and `replace` overwrites both in a single
/// commit. Records must round-trip field for field, including the absence
/// of `exit_time`/`total_amount` on active tickets.
///
/// Writes are not retried here; a failure surfaces once to the caller.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait TicketStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read a collection. An absent key is an empty collection, not an error.
  fn get(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Ticket>, Self::Error>> + Send + '_;

  /// Overwrite a collection.
  fn set(
    &self,
    collection: Collection,
    tickets: Vec<Ticket>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Overwrite both collections in one durable commit.
  ///
  /// Backends must make this atomic: either both sequences land or neither
  /// does. [`TicketLedger::close`](crate::ledger::TicketLedger::close)
  /// relies on this when moving a ticket from the active collection to
  /// history, so an interruption cannot strand the ticket in neither.
  fn replace(
    &self,
    active: Vec<Ticket>,
    history: Vec<Ticket>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
