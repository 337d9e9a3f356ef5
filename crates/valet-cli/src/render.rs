//! Display helpers: table rows and time formatting.

use chrono::{DateTime, Local, Utc};
use tabled::Tabled;
use valet_core::{billing, ticket::Ticket};

/// First hex block of the id, enough to name a ticket at the till.
pub fn short_id(ticket: &Ticket) -> String {
  let hex = ticket.id.simple().to_string();
  hex[..8].to_string()
}

/// Local wall-clock time, `14h20` style.
pub fn clock_time(at: DateTime<Utc>) -> String {
  at.with_timezone(&Local).format("%Hh%M").to_string()
}

/// Local date and time for history rows.
pub fn date_time(at: DateTime<Utc>) -> String {
  at.with_timezone(&Local).format("%Y-%m-%d %Hh%M").to_string()
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One line of `valet list`.
#[derive(Tabled)]
pub struct ActiveRow {
  #[tabled(rename = "id")]
  id:       String,
  #[tabled(rename = "parking")]
  parking:  String,
  #[tabled(rename = "rate/h")]
  rate:     u32,
  #[tabled(rename = "entered")]
  entered:  String,
  #[tabled(rename = "duration")]
  duration: String,
  #[tabled(rename = "due")]
  due:      u64,
}

impl ActiveRow {
  pub fn from_ticket(ticket: &Ticket, now: DateTime<Utc>) -> Self {
    Self {
      id:       short_id(ticket),
      parking:  ticket.parking_name.clone(),
      rate:     ticket.price_per_hour,
      entered:  clock_time(ticket.entry_time),
      duration: billing::format_duration(ticket.elapsed_minutes(now)),
      due:      ticket.amount_due(now),
    }
  }
}

/// One line of `valet history`.
#[derive(Tabled)]
pub struct HistoryRow {
  #[tabled(rename = "id")]
  id:       String,
  #[tabled(rename = "parking")]
  parking:  String,
  #[tabled(rename = "entered")]
  entered:  String,
  #[tabled(rename = "exited")]
  exited:   String,
  #[tabled(rename = "duration")]
  duration: String,
  #[tabled(rename = "amount")]
  amount:   String,
}

impl HistoryRow {
  pub fn from_ticket(ticket: &Ticket) -> Self {
    let (exited, duration) = match ticket.exit_time {
      Some(exit) => (
        date_time(exit),
        billing::format_duration(billing::duration_minutes(
          ticket.entry_time,
          exit,
        )),
      ),
      None => ("-".into(), "-".into()),
    };
    let amount = ticket
      .total_amount
      .map_or_else(|| "-".into(), |total| total.to_string());

    Self {
      id: short_id(ticket),
      parking: ticket.parking_name.clone(),
      entered: date_time(ticket.entry_time),
      exited,
      duration,
      amount,
    }
  }
}
