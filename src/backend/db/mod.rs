//! # Persistence Layer
//!
//! This module owns the SQLite connection pool and every table the server
//! reads or writes. The handle is created once at startup, injected into the
//! request handlers through `AppState`, and closed on shutdown.
//!
//! ## Key Components
//!
//! - `Database`: connection pool, migrations, lifecycle
//! - `credentials.rs`: credential identities (name, mail, salt, hash)
//! - `sessions.rs`: session tokens and their expiry
//!
//! ## Transactions
//!
//! Every write runs in its own transaction. A `sqlx::Transaction` that is
//! dropped without `commit` rolls back, so a request that is cancelled or
//! fails halfway leaves no partial rows behind.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cookie_auth::backend::db::Database;
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let db = Database::init("sqlite://data/main.sqlite").await?;
//! let credential = db.find_credential("alice").await?;
//! db.close().await;
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod sessions;

pub use credentials::{conflicting_field, Credential, CredentialField, NewCredential};
pub use sessions::Session;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Result as SqlxResult;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Result type for database operations
pub type Result<T> = SqlxResult<T>;

/// Database connection manager
///
/// Cheap to clone: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and bring the schema up to date
    ///
    /// This is the startup entry point. For file databases the parent
    /// directory is created when missing.
    pub async fn init(database_url: &str) -> Result<Self> {
        if let Some(parent) = sqlite_file_path(database_url).and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self::connect(database_url).await?;
        db.migrate().await?;

        tracing::info!("Database tables created and ready to use");
        Ok(db)
    }

    /// Open a connection pool without running migrations
    ///
    /// In-memory databases live inside a single connection, so their pool is
    /// pinned to exactly one connection that never idles out.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let in_memory = is_in_memory(database_url);

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(in_memory, "Database connection pool created");

        Ok(Self { pool })
    }

    /// Run pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    ///
    /// Waits for checked-out connections to be returned first.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Filesystem path of a file-backed SQLite URL
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    if is_in_memory(database_url) {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}
