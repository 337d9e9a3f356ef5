//! Subcommand implementations.
//!
//! Each subcommand maps onto one screen of a till-side workflow: open a
//! ticket when a vehicle enters, watch the live amount, close when it
//! leaves, browse or prune the history.

use std::io::Write as _;

use anyhow::{Context as _, bail};
use tabled::{Table, settings::Style};
use tokio::time::{self, Duration};
use valet_core::{
  billing,
  clock::Clock,
  ledger::TicketLedger,
  store::TicketStore,
  ticket::{NewTicket, Ticket},
};

use crate::{
  Command,
  render::{self, ActiveRow, HistoryRow},
};

pub async fn run<S, C>(
  command: Command,
  ledger: &TicketLedger<S, C>,
) -> anyhow::Result<()>
where
  S: TicketStore,
  C: Clock,
{
  match command {
    Command::Open { parking_name, rate } => open(ledger, parking_name, rate).await,
    Command::List => list(ledger).await,
    Command::Show { id, watch } => show(ledger, &id, watch).await,
    Command::Close { id } => close(ledger, &id).await,
    Command::History => history(ledger).await,
    Command::Delete { id } => delete(ledger, &id).await,
  }
}

// ─── Open ─────────────────────────────────────────────────────────────────────

async fn open<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
  parking_name: String,
  rate: u32,
) -> anyhow::Result<()> {
  let ticket = ledger
    .open(NewTicket { parking_name, price_per_hour: rate })
    .await?;

  println!(
    "Opened {} for {} at {}/h, entered {}.",
    render::short_id(&ticket),
    ticket.parking_name,
    ticket.price_per_hour,
    render::clock_time(ticket.entry_time),
  );
  Ok(())
}

// ─── List ─────────────────────────────────────────────────────────────────────

async fn list<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
) -> anyhow::Result<()> {
  let mut tickets = ledger.active().await?;
  if tickets.is_empty() {
    println!("No open tickets.");
    return Ok(());
  }
  tickets.sort_by_key(|t| std::cmp::Reverse(t.entry_time));

  let now = ledger.now();
  let rows: Vec<ActiveRow> =
    tickets.iter().map(|t| ActiveRow::from_ticket(t, now)).collect();
  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}

// ─── Show ─────────────────────────────────────────────────────────────────────

async fn show<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
  id: &str,
  watch: bool,
) -> anyhow::Result<()> {
  let active = ledger.active().await?;
  let ticket = resolve(&active, id)?
    .with_context(|| format!("no open ticket matches {id:?}"))?;

  println!("Parking     {}", ticket.parking_name);
  println!("Rate        {}/h", ticket.price_per_hour);
  println!("Entered     {}", render::clock_time(ticket.entry_time));

  if watch {
    watch_ticket(ledger, ticket).await
  } else {
    let now = ledger.now();
    println!(
      "Duration    {}",
      billing::format_duration(ticket.elapsed_minutes(now))
    );
    println!("Amount due  {}", ticket.amount_due(now));
    Ok(())
  }
}

/// Re-derive the live duration and amount once per second until Ctrl-C.
///
/// Pure recomputation from the loaded ticket; no storage access per tick.
/// The timer dies with this function, nothing dangles.
async fn watch_ticket<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
  ticket: &Ticket,
) -> anyhow::Result<()> {
  let mut interval = time::interval(Duration::from_secs(1));
  let ctrl_c = tokio::signal::ctrl_c();
  tokio::pin!(ctrl_c);

  loop {
    tokio::select! {
      _ = interval.tick() => {
        let now = ledger.now();
        print!(
          "\rDuration    {}   amount due {}   ",
          billing::format_duration(ticket.elapsed_minutes(now)),
          ticket.amount_due(now),
        );
        std::io::stdout().flush().ok();
      }
      _ = &mut ctrl_c => {
        println!();
        return Ok(());
      }
    }
  }
}

// ─── Close ────────────────────────────────────────────────────────────────────

async fn close<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
  id: &str,
) -> anyhow::Result<()> {
  let active = ledger.active().await?;
  let ticket = resolve(&active, id)?
    .with_context(|| format!("no open ticket matches {id:?}"))?;

  let closed = ledger.close(ticket.id).await?;
  let minutes = closed
    .exit_time
    .map(|exit| billing::duration_minutes(closed.entry_time, exit))
    .unwrap_or_default();

  println!(
    "Closed {} ({}): parked {}, {} due.",
    render::short_id(&closed),
    closed.parking_name,
    billing::format_duration(minutes),
    closed.total_amount.unwrap_or_default(),
  );
  Ok(())
}

// ─── History ──────────────────────────────────────────────────────────────────

async fn history<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
) -> anyhow::Result<()> {
  let mut tickets = ledger.history().await?;
  if tickets.is_empty() {
    println!("No closed tickets.");
    return Ok(());
  }
  tickets.sort_by_key(|t| std::cmp::Reverse(t.exit_time));

  let rows: Vec<HistoryRow> =
    tickets.iter().map(HistoryRow::from_ticket).collect();
  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

async fn delete<S: TicketStore, C: Clock>(
  ledger: &TicketLedger<S, C>,
  id: &str,
) -> anyhow::Result<()> {
  let history = ledger.history().await?;
  match resolve(&history, id)? {
    Some(ticket) => {
      ledger.delete(ticket.id).await?;
      println!(
        "Deleted {} ({}) from history.",
        render::short_id(ticket),
        ticket.parking_name
      );
    }
    None => println!("No history ticket matches {id:?}; nothing to delete."),
  }
  Ok(())
}

// ─── Id resolution ────────────────────────────────────────────────────────────

/// Find the ticket whose id starts with `prefix` (hyphens ignored).
/// Errors only when the prefix is ambiguous.
fn resolve<'t>(
  tickets: &'t [Ticket],
  prefix: &str,
) -> anyhow::Result<Option<&'t Ticket>> {
  let needle = prefix.replace('-', "").to_ascii_lowercase();
  let mut matches = tickets
    .iter()
    .filter(|t| t.id.simple().to_string().starts_with(&needle));

  match (matches.next(), matches.next()) {
    (Some(ticket), None) => Ok(Some(ticket)),
    (None, _) => Ok(None),
    (Some(_), Some(_)) => bail!("ticket id prefix {prefix:?} is ambiguous"),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
