use crate::database::models::DatabaseConfig;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::sync::Mutex;

/// Generic sqlite connection wrapper. Table schemas are owned by whichever
/// module opens the connection (see `scc::persistence::SqliteSwapStore` for
/// the swap-classification schema) — this wrapper only owns the connection
/// lifecycle and thread-safety.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

// `rusqlite::Connection` is `!Sync` only because of an internal `Cell`;
// all access here is serialized through `conn`'s mutex.
unsafe impl Send for Database {}
unsafe impl Sync for Database {}

impl Database {
    /// Open a database connection at the given path, creating the file
    /// (and any parent directories) if it doesn't exist.
    pub fn new(db_path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory for {}", db_path))?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database: {}", db_path))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a database connection using the given configuration.
    pub fn with_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path)
    }

    /// Run a closure with exclusive access to the underlying connection.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self.conn.lock().expect("database mutex poisoned");
        f(&conn)
    }

    /// Run a closure with exclusive, mutable access to the underlying
    /// connection — needed to open a `rusqlite::Transaction`.
    pub fn with_conn_mut<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Connection) -> Result<R>,
    {
        let mut conn = self.conn.lock().expect("database mutex poisoned");
        f(&mut conn)
    }
}
