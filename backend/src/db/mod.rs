//! SQLite persistence for herd records.
//!
//! Every request opens its own connection from the configured database path,
//! so the store is used from inside blocking tasks only.

pub mod records;
mod schema;

use crate::db::records::Record;
use crate::pipeline::resolver::ReferenceLookup;
use crate::pipeline::BulkWriter;
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Opens (creating if needed) the database at `path` and applies the schema.
pub fn open(path: &str) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<(), StoreError> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(schema::SCHEMA)?;
    Ok(())
}

/// `ReferenceLookup` and `BulkWriter` backed by one SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Ok(Self { conn: open(path)? })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        prepare(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReferenceLookup for SqliteStore {
    fn animal_id_by_tag(&self, tag: &str) -> Result<Option<String>, StoreError> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM animals WHERE tag_number = ?1",
                params![tag],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(id)
    }

    fn property_id_by_name(&self, name: &str) -> Result<Option<String>, StoreError> {
        // Property names are not unique; the oldest property wins.
        let id = self
            .conn
            .query_row(
                "SELECT id FROM properties WHERE name = ?1 ORDER BY rowid LIMIT 1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(id)
    }
}

impl BulkWriter for SqliteStore {
    /// Inserts all `rows` in one transaction. Any failing row rolls back the
    /// whole batch.
    fn insert_all<R: Record>(&mut self, rows: &[R]) -> Result<usize, StoreError> {
        let sql = R::insert_sql();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(params_from_iter(row.values()))?;
            }
        }
        tx.commit()?;
        debug!("Inserted {} rows into {}", rows.len(), R::TABLE);
        Ok(rows.len())
    }
}
