//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The segmentation core never executes SQL; it receives line items and
//! hands back result rows. Loading happens before a run, export after.
//!
//! RULE: Reading never changes the schema.
//! `open_existing` neither creates the file nor touches the journal mode,
//! and only `migrate_results` adds tables to a source database.

use crate::error::SegResult;
use rusqlite::{Connection, OpenFlags};

mod results;
mod sales;

const SALES_MIGRATION: &str = include_str!("../../../migrations/001_sales_transaction.sql");
const RESULTS_MIGRATION: &str = include_str!("../../../migrations/002_segmentation_results.sql");

pub struct SegStore {
    conn: Connection,
}

impl SegStore {
    /// Open (or create) the database at `path`. URI filenames are accepted.
    pub fn open(path: &str) -> SegResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open a database that must already exist. A missing file is an error.
    pub fn open_existing(path: &str) -> SegResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SegResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Safe to repeat.
    pub fn migrate(&self) -> SegResult<()> {
        self.conn.execute_batch(SALES_MIGRATION)?;
        self.migrate_results()
    }

    /// Create only the result tables. Safe to repeat.
    pub fn migrate_results(&self) -> SegResult<()> {
        self.conn.execute_batch(RESULTS_MIGRATION)?;
        Ok(())
    }

    pub fn has_table(&self, name: &str) -> SegResult<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |r| r.get(0),
        )?;
        Ok(n > 0)
    }
}
