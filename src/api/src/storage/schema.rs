//! SQLite schema for the race results table
//!
//! Tables:
//! - racers: One row per driver, keyed by driver code (`abr`)
//!
//! The service assumes the table already exists. The DDL below is only used
//! to build fixtures in tests.

/// Name of the results table.
pub const RACERS_TABLE: &str = "racers";

/// Columns in store order. Everything except `abr` is published as the value.
pub const RACER_COLUMNS: &str = "position, abr, racer_name, team, time";

#[cfg(test)]
pub use fixtures::{create_tables, create_test_store, monaco_racers, racer};


#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1",
                [RACERS_TABLE],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_create_test_store_rejects_duplicate_codes() {
        let dir = tempfile::tempdir().unwrap();
        let mut racers = monaco_racers();
        racers.push(racers[0].clone());

        assert!(create_test_store(dir.path(), &racers).is_err());
    }
}
