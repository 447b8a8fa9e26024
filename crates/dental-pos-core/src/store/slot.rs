//! Single-slot persistence backend.
//!
//! The whole store serializes to one JSON document kept under a fixed key
//! in a tiny key-value table. One slot, one blob; readers never see a
//! partially written document because the write is a single statement.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::StoreResult;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_slot (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// SQLite-backed slot holding a single serialized document per key.
pub struct StorageSlot {
    conn: Connection,
}

impl StorageSlot {
    /// Open the slot at path, creating the file and schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let slot = Self { conn };
        slot.initialize()?;
        Ok(slot)
    }

    /// Create an in-memory slot (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let slot = Self { conn };
        slot.initialize()?;
        Ok(slot)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Read the blob stored under key, if any.
    pub fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_slot WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write the blob under key, replacing any previous value.
    pub fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slot (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove the blob under key.
    pub fn clear(&self, key: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kv_slot WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let slot = StorageSlot::open_in_memory();
        assert!(slot.is_ok());
    }

    #[test]
    fn test_read_empty_slot() {
        let slot = StorageSlot::open_in_memory().unwrap();
        assert_eq!(slot.read("missing").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let slot = StorageSlot::open_in_memory().unwrap();
        slot.write("k", r#"{"a":1}"#).unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let slot = StorageSlot::open_in_memory().unwrap();
        slot.write("k", "first").unwrap();
        slot.write("k", "second").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear() {
        let slot = StorageSlot::open_in_memory().unwrap();
        slot.write("k", "value").unwrap();
        assert!(slot.clear("k").unwrap());
        assert!(!slot.clear("k").unwrap());
        assert_eq!(slot.read("k").unwrap(), None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.db");

        {
            let slot = StorageSlot::open(&path).unwrap();
            slot.write("k", "survives").unwrap();
        }

        let slot = StorageSlot::open(&path).unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("survives"));
    }
}
