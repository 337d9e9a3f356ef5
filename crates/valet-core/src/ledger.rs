//! Ticket lifecycle manager.
//!
//! [`TicketLedger`] owns the `active → closed` transition and the
//! bookkeeping of moving records between the two collections. Billing math
//! is delegated to [`crate::billing`]; persistence goes through the
//! [`TicketStore`] contract.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  clock::Clock,
  error::{Error, Result},
  store::{Collection, TicketStore},
  ticket::{NewTicket, Ticket, TicketStatus},
};

/// The lifecycle manager for parking tickets.
///
/// Generic over the storage backend and the clock so it is deterministic
/// under test. Operations are run one at a time against a given store; the
/// single-user environment has no parallel writers, so the ledger does no
/// locking of its own.
#[derive(Debug, Clone)]
pub struct TicketLedger<S, C> {
  store: S,
  clock: C,
}

impl<S, C> TicketLedger<S, C>
where
  S: TicketStore,
  C: Clock,
{
  pub fn new(store: S, clock: C) -> Self { Self { store, clock } }

  /// The current instant, from the injected clock. Callers use this as the
  /// reference time for live duration/amount displays.
  pub fn now(&self) -> DateTime<Utc> { self.clock.now() }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Open a ticket: validate the input, stamp a fresh id and the entry
  /// time, and append it to the active collection.
  ///
  /// Validation happens before any storage attempt, so a rejected input
  /// leaves no partial state. If the store write fails the ticket was not
  /// created.
  pub async fn open(&self, input: NewTicket) -> Result<Ticket> {
    let parking_name = input.parking_name.trim();
    if parking_name.is_empty() {
      return Err(Error::EmptyParkingName);
    }
    if input.price_per_hour == 0 {
      return Err(Error::ZeroRate);
    }

    let ticket = Ticket {
      id:             Uuid::new_v4(),
      parking_name:   parking_name.to_string(),
      price_per_hour: input.price_per_hour,
      entry_time:     self.clock.now(),
      status:         TicketStatus::Active,
      exit_time:      None,
      total_amount:   None,
    };

    let mut active = self.load(Collection::Active).await?;
    active.push(ticket.clone());
    self
      .store
      .set(Collection::Active, active)
      .await
      .map_err(Error::storage)?;

    Ok(ticket)
  }

  /// Close a ticket: stamp the exit time, compute the final amount, and
  /// move the record from the active collection to history.
  ///
  /// Both collections are committed through [`TicketStore::replace`], so an
  /// interruption cannot leave the ticket in neither. A second close of the
  /// same id reports [`Error::TicketNotFound`] (the ticket left the active
  /// collection with the first close); history is never double-appended.
  pub async fn close(&self, id: Uuid) -> Result<Ticket> {
    let mut active = self.load(Collection::Active).await?;
    let position = active
      .iter()
      .position(|t| t.id == id)
      .ok_or(Error::TicketNotFound(id))?;
    let closed = active.remove(position).closed_at(self.clock.now());

    let mut history = self.load(Collection::History).await?;
    history.push(closed.clone());
    self
      .store
      .replace(active, history)
      .await
      .map_err(Error::storage)?;

    Ok(closed)
  }

  /// Delete a closed ticket from history.
  ///
  /// Deleting an id that is not there is a no-op, so the operation is
  /// idempotent; it fails only when the store does.
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    let history = self.load(Collection::History).await?;
    let remaining: Vec<Ticket> =
      history.into_iter().filter(|t| t.id != id).collect();
    self
      .store
      .set(Collection::History, remaining)
      .await
      .map_err(Error::storage)
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  /// All open tickets, in the order they were opened. Display ordering is
  /// the caller's concern.
  pub async fn active(&self) -> Result<Vec<Ticket>> {
    self.load(Collection::Active).await
  }

  /// All closed tickets, in the order they were closed.
  pub async fn history(&self) -> Result<Vec<Ticket>> {
    self.load(Collection::History).await
  }

  /// Fetch one open ticket by id.
  pub async fn get_active(&self, id: Uuid) -> Result<Option<Ticket>> {
    Ok(
      self
        .load(Collection::Active)
        .await?
        .into_iter()
        .find(|t| t.id == id),
    )
  }

  async fn load(&self, collection: Collection) -> Result<Vec<Ticket>> {
    self.store.get(collection).await.map_err(Error::storage)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
