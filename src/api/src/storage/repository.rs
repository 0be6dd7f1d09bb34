//! SQLite repository for read-only queries on race results

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

use super::schema::{RACERS_TABLE, RACER_COLUMNS};
use crate::error::ReportResult;
use crate::types::Racer;

/// Location of the results database.
///
/// Holds no connection: every call to [`RacerStore::open`] opens a new one,
/// so handlers never share a connection.
#[derive(Debug, Clone)]
pub struct RacerStore {
    path: PathBuf,
}

impl RacerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection. A missing file is an error rather than
    /// a freshly created empty database.
    pub fn open(&self) -> ReportResult<RacerRepository> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(RacerRepository { conn })
    }
}

/// Repository over a single connection to the results table
pub struct RacerRepository {
    conn: Connection,
}

impl RacerRepository {
    fn racer_from_row(row: &Row<'_>) -> rusqlite::Result<Racer> {
        Ok(Racer {
            position: row.get(0)?,
            abr: row.get(1)?,
            racer_name: row.get(2)?,
            team: row.get(3)?,
            time: row.get(4)?,
        })
    }

    /// All racers, in store-native order
    pub fn get_racers(&self) -> ReportResult<Vec<Racer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM {}", RACER_COLUMNS, RACERS_TABLE))?;

        let racers = stmt
            .query_map([], Self::racer_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(racers)
    }

    /// `(abr, racer_name)` pairs, in store-native order
    pub fn get_driver_names(&self) -> ReportResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT abr, racer_name FROM {}", RACERS_TABLE))?;

        let names = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(names)
    }

    /// Exact-match lookup by driver code
    pub fn get_racer(&self, code: &str) -> ReportResult<Option<Racer>> {
        let racer = self
            .conn
            .query_row(
                &format!("SELECT {} FROM {} WHERE abr = ?1", RACER_COLUMNS, RACERS_TABLE),
                [code],
                Self::racer_from_row,
            )
            .optional()?;

        Ok(racer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::storage::schema::{create_tables, create_test_store, monaco_racers, racer};

    #[test]
    fn test_get_racers_in_store_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut racers = monaco_racers();
        // Insert out of finishing order; reads must not re-sort.
        racers.reverse();
        let path = create_test_store(dir.path(), &racers).unwrap();

        let repo = RacerStore::new(path).open().unwrap();
        let loaded = repo.get_racers().unwrap();

        assert_eq!(loaded, racers);
        assert_eq!(loaded[0].abr, "BOT");
    }

    #[test]
    fn test_get_driver_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_store(dir.path(), &monaco_racers()).unwrap();

        let names = RacerStore::new(path).open().unwrap().get_driver_names().unwrap();
        assert_eq!(
            names,
            vec![
                ("HAM".to_string(), "Lewis Hamilton".to_string()),
                ("BOT".to_string(), "Valtteri Bottas".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_racer() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_store(dir.path(), &monaco_racers()).unwrap();
        let repo = RacerStore::new(path).open().unwrap();

        let bot = repo.get_racer("BOT").unwrap().unwrap();
        assert_eq!(bot.racer_name, "Valtteri Bottas");

        assert!(repo.get_racer("ZZZ").unwrap().is_none());
        // Exact match only
        assert!(repo.get_racer("bot").unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        let result = RacerStore::new(&path).open();
        assert!(matches!(result, Err(ReportError::StoreUnavailable(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path).unwrap();

        let repo = RacerStore::new(&path).open().unwrap();
        assert!(matches!(
            repo.get_racers(),
            Err(ReportError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_store_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.db");
        create_tables(&Connection::open(&path).unwrap()).unwrap();

        let repo = RacerStore::new(&path).open().unwrap();
        let write = repo.conn.execute(
            "INSERT INTO racers VALUES (1, 'HAM', 'Lewis Hamilton', 'Mercedes', '1:30')",
            [],
        );
        assert!(write.is_err());
    }

    #[test]
    fn test_positions_outside_u32_decode() {
        let dir = tempfile::tempdir().unwrap();
        let racers = vec![
            racer(5_000_000_000, "BIG", "Big Number", "Team", "+1 lap"),
            racer(-1, "NEG", "Negative", "Team", "DNF"),
        ];
        let path = create_test_store(dir.path(), &racers).unwrap();

        let loaded = RacerStore::new(path).open().unwrap().get_racers().unwrap();
        assert_eq!(loaded, racers);
    }
}
