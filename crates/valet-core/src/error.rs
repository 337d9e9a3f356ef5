//! Error types for `valet-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// Creation input rejected before any storage attempt.
  #[error("parking name must not be empty")]
  EmptyParkingName,

  /// Creation input rejected before any storage attempt.
  #[error("price per hour must be positive")]
  ZeroRate,

  /// The id is not in the active collection: never seen there, or already
  /// closed and moved to history.
  #[error("ticket not found: {0}")]
  TicketNotFound(Uuid),

  /// The storage backend failed. Not retried here; the caller decides.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
