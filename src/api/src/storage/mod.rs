//! SQLite storage module for race results
//!
//! Read-only access to the `racers` table. Rows are provisioned by a
//! separate ingestion process; this crate never writes to the store.

pub mod repository;
pub mod schema;

pub use repository::{RacerRepository, RacerStore};
