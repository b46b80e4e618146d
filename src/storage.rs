//! Local persistence for the shipment snapshot and comment threads.
//!
//! Everything lives in one `SQLite` file under the storage root:
//!
//! ```text
//! <root>/tracker.sqlite
//!   snapshot   # The last successfully refreshed shipment list (one row)
//!   comment    # Comment threads, scoped by (shipment_id, entry_id)
//! ```

mod comments;
mod snapshot;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;

pub use snapshot::Snapshot;

const DB_FILE: &str = "tracker.sqlite";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS snapshot (
    id           INTEGER PRIMARY KEY CHECK (id = 1),
    refreshed_at TEXT,
    body         TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS comment (
    id          TEXT PRIMARY KEY,
    shipment_id TEXT NOT NULL,
    entry_id    TEXT NOT NULL,
    author      TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS comment_scope ON comment (shipment_id, entry_id);
";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt data: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local `SQLite` storage for the tracker.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database under the given root.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join(DB_FILE))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns the default storage root: `~/.shiptrack/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shiptrack"))
    }
}

/// Parses a stored timestamp column.
fn parse_timestamp(column: &str, value: &str) -> Result<jiff::Timestamp> {
    value
        .parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {column}: {e}")))
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use super::Storage;

    pub fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("shiptrack")).unwrap();
        (dir, storage)
    }
}
