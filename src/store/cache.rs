use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::{Connection, params};

use crate::config::{StorageSettings, default_data_dir};

use super::entity::AudioRow;

/// Resolve the cache database path: `VIVACE_CACHE_PATH`, then the config
/// override, then the XDG default.
pub fn resolve_cache_path(storage: &StorageSettings) -> Option<PathBuf> {
    if let Some(p) = env::var_os("VIVACE_CACHE_PATH") {
        return Some(PathBuf::from(p));
    }
    if let Some(p) = &storage.cache_path {
        return Some(p.clone());
    }
    default_data_dir().map(|d| d.join("library.db"))
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS audio (
    id           INTEGER PRIMARY KEY,
    uri          TEXT NOT NULL,
    display_name TEXT NOT NULL,
    artist       TEXT NOT NULL,
    path         TEXT NOT NULL,
    duration_ms  INTEGER NOT NULL,
    title        TEXT NOT NULL
)";

/// The one-table metadata cache backing the library.
pub struct AudioCache {
    conn: Connection,
}

impl AudioCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory cache.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Fetch every cached record, ordered by display name.
    pub fn fetch_all(&self) -> Result<Vec<AudioRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uri, display_name, artist, path, duration_ms, title
             FROM audio
             ORDER BY display_name COLLATE NOCASE ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(AudioRow {
                id: row.get(0)?,
                uri: row.get(1)?,
                display_name: row.get(2)?,
                artist: row.get(3)?,
                path: row.get(4)?,
                duration_ms: row.get(5)?,
                title: row.get(6)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Insert records, replacing any existing row with the same id.
    pub fn insert_all(&mut self, rows: &[AudioRow]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO audio
                 (id, uri, display_name, artist, path, duration_ms, title)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.id,
                    row.uri,
                    row.display_name,
                    row.artist,
                    row.path,
                    row.duration_ms,
                    row.title,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// True when the cache holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audio", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// Drop every cached record.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM audio", [])?;
        Ok(())
    }
}
