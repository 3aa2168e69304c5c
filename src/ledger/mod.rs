//! Outage event ledger.
//!
//! Stores status transitions as `timestamp,status` rows and rebuilds them
//! into a sorted event log on every read.

mod models;
mod reconstruct;
mod store;

pub use models::*;
pub use store::*;
