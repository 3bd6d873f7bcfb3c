//! SQLite-backed storage for the saved voucher address.
//!
//! Values live in a single `kv` table. Every call runs on tokio's blocking pool
//! so the UI thread never waits on disk.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::{Connection, OptionalExtension, params};
use rusqlite_migration::{M, Migrations};
use thiserror::Error;
use voucher_shell::{StoreError, UrlStore};

const DATABASE_FILE: &str = "voucher.sqlite3";

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )])
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Migration(#[from] rusqlite_migration::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("no data directory available")]
    NoDataDir,
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        StoreError::backend(err)
    }
}

/// Location of the database inside `dir`.
pub fn database_path_in(dir: &Path) -> PathBuf {
    dir.join(DATABASE_FILE)
}

/// The per-user data directory location of the database.
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub fn default_database_path() -> Result<PathBuf, PersistenceError> {
    use directories::ProjectDirs;
    let dirs =
        ProjectDirs::from("com", "VoucherView", "Voucher").ok_or(PersistenceError::NoDataDir)?;
    Ok(database_path_in(dirs.data_dir()))
}

/// A [`UrlStore`] persisted in SQLite. Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!("Opening link store at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    pub fn open_default() -> Result<Self, PersistenceError> {
        Self::open(default_database_path()?)
    }

    /// A store that forgets everything when the process exits.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self, PersistenceError> {
        migrations().to_latest(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, PersistenceError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn)
        })
        .await?;
        Ok(result?)
    }
}

impl UrlStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = key.to_string();
        let value = self
            .with_conn(move |conn| {
                conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()
            })
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let (key, value) = (key.to_string(), value.to_string());
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
        })
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let key = key.to_string();
        self.with_conn(move |conn| conn.execute("DELETE FROM kv WHERE key = ?1", params![key]))
            .await?;
        Ok(())
    }
}
