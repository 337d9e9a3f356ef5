//! [`SqliteStore`] — the SQLite implementation of [`TicketStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use valet_core::{
  store::{Collection, TicketStore},
  ticket::Ticket,
};

use crate::{Error, Result, schema::SCHEMA};

const UPSERT: &str = "INSERT INTO collections (key, tickets) VALUES (?1, ?2)
   ON CONFLICT(key) DO UPDATE SET tickets = excluded.tickets";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ticket store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TicketStore impl ────────────────────────────────────────────────────────

impl TicketStore for SqliteStore {
  type Error = Error;

  async fn get(&self, collection: Collection) -> Result<Vec<Ticket>> {
    let key = collection.key();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tickets FROM collections WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    match raw {
      Some(json) => Ok(serde_json::from_str(&json)?),
      None => Ok(Vec::new()),
    }
  }

  async fn set(&self, collection: Collection, tickets: Vec<Ticket>) -> Result<()> {
    let key = collection.key();
    let json = serde_json::to_string(&tickets)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(UPSERT, rusqlite::params![key, json])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace(
    &self,
    active: Vec<Ticket>,
    history: Vec<Ticket>,
  ) -> Result<()> {
    let active_json = serde_json::to_string(&active)?;
    let history_json = serde_json::to_string(&history)?;

    // One transaction: a close can never land in only one collection.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          UPSERT,
          rusqlite::params![Collection::Active.key(), active_json],
        )?;
        tx.execute(
          UPSERT,
          rusqlite::params![Collection::History.key(), history_json],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
