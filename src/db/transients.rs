use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::stores::CacheStore;

/// Transient cache backed by the `transients` table. Expired rows are
/// dropped lazily on read.
pub struct SqliteCache<'a> {
    db: &'a Database,
}

impl<'a> SqliteCache<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl CacheStore for SqliteCache<'_> {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        let now = Utc::now().timestamp();
        self.db.with_conn(|conn| {
            let row: Option<(String, i64)> = conn
                .query_row(
                    "SELECT value, expires_at FROM transients WHERE cache_key = ?1",
                    params![key],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            match row {
                Some((value, expires_at)) if expires_at > now => Ok(Some(value)),
                Some(_) => {
                    conn.execute(
                        "DELETE FROM transients WHERE cache_key = ?1",
                        params![key],
                    )
                    .map_err(|e| ServerError::DbError(e.to_string()))?;
                    Ok(None)
                }
                None => Ok(None),
            }
        })
    }

    fn set(&self, key: &str, value: &str, ttl_secs: i64) -> Result<(), ServerError> {
        let expires_at = Utc::now().timestamp() + ttl_secs;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO transients (cache_key, value, expires_at)
                 VALUES (?1, ?2, ?3)",
                params![key, value, expires_at],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
            Ok(())
        })
    }

    fn delete_prefix(&self, prefix: &str) -> Result<(), ServerError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM transients WHERE cache_key LIKE ?1 || '%'",
                params![prefix],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
            Ok(())
        })
    }
}
