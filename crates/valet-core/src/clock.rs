//! Clock capability.
//!
//! "Now" is injected rather than read ambiently so the ledger and its tests
//! are deterministic. Production code uses [`SystemClock`]; tests drive a
//! [`ManualClock`] forward by hand.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock> Clock for Arc<C> {
  fn now(&self) -> DateTime<Utc> { (**self).now() }
}

// ─── SystemClock ─────────────────────────────────────────────────────────────

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

// ─── ManualClock ─────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
///
/// Shared behind an [`Arc`] it lets a test open a ticket, jump an hour
/// forward, and close it, without ever sleeping.
#[derive(Debug)]
pub struct ManualClock {
  now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn at(start: DateTime<Utc>) -> Self {
    Self { now: Mutex::new(start) }
  }

  pub fn set(&self, to: DateTime<Utc>) {
    *self.now.lock().expect("clock mutex poisoned") = to;
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.now.lock().expect("clock mutex poisoned");
    *now += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().expect("clock mutex poisoned")
  }
}
