//! The ticket entity — the one record the whole system revolves around.
//!
//! A ticket is written once at open, copied once at close, and never
//! otherwise mutated. Everything that changes while a vehicle is parked
//! (elapsed duration, amount due) is derived on demand from `entry_time`
//! and a caller-supplied reference instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing;

/// Where a ticket is in its life. The only transition is
/// `Active` → `Closed`, taken exactly once; closed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
  Active,
  Closed,
}

/// A parking ticket.
///
/// Active tickets have no `exit_time`/`total_amount`; closed tickets have
/// both. The optional fields are omitted entirely from the serialised
/// record while absent, so an active ticket round-trips without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
  pub id:             Uuid,
  pub parking_name:   String,
  /// Currency units per started hour; positive.
  pub price_per_hour: u32,
  pub entry_time:     DateTime<Utc>,
  pub status:         TicketStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exit_time:      Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_amount:   Option<u64>,
}

impl Ticket {
  pub fn is_active(&self) -> bool {
    matches!(self.status, TicketStatus::Active)
  }

  /// Whole minutes parked as of `reference`.
  pub fn elapsed_minutes(&self, reference: DateTime<Utc>) -> i64 {
    billing::duration_minutes(self.entry_time, reference)
  }

  /// Amount due if the vehicle left at `reference`.
  ///
  /// Derived, never stored; recompute on every display tick rather than
  /// caching, since it changes while the ticket is open.
  pub fn amount_due(&self, reference: DateTime<Utc>) -> u64 {
    billing::price(self.entry_time, reference, self.price_per_hour)
  }

  /// The closed copy of this ticket: exit time and final amount stamped,
  /// status flipped. The source record is left untouched.
  pub(crate) fn closed_at(&self, exit_time: DateTime<Utc>) -> Ticket {
    Ticket {
      status: TicketStatus::Closed,
      exit_time: Some(exit_time),
      total_amount: Some(billing::price(
        self.entry_time,
        exit_time,
        self.price_per_hour,
      )),
      ..self.clone()
    }
  }
}

/// Input to [`TicketLedger::open`](crate::ledger::TicketLedger::open).
/// The id and entry time are assigned by the ledger, not accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct NewTicket {
  pub parking_name:   String,
  pub price_per_hour: u32,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
