//! Core types and trait definitions for the Valet parking ticket tracker.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The other crates depend on it; it depends on nothing heavier than
//! `chrono` and `serde`.

pub mod billing;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod store;
pub mod ticket;

pub use error::{Error, Result};
