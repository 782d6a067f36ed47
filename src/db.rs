use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{CredentialStore, SqliteCredentialStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteCredentialStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Opens the database named by the config and makes sure the schema exists.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database_url).await?;
        let store = SqliteCredentialStore::new(db);
        store.initialize().await.context("create users table")?;
        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }
}

/// Opens (or creates) the SQLite database at `database_url`.
///
/// The pool holds exactly one connection for the life of the process, so
/// statements run strictly in submission order and an in-memory database
/// is never dropped behind our back.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {database_url}"))?
        .create_if_missing(true);
    if !is_in_memory(database_url) {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("connect to database")?;

    info!(url = %database_url, "database opened");
    Ok(db)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) async fn connect_in_memory() -> SqlitePool {
    connect("sqlite::memory:")
        .await
        .expect("in-memory database should open")
}
