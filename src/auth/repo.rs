use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::auth::error::AuthError;
use crate::auth::repo_types::User;

/// Durable create/read/update/delete over the `users` table.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates the users table if it does not exist yet. Safe to call on every start.
    async fn initialize(&self) -> Result<(), AuthError>;

    /// Registers a new user and returns the assigned id.
    async fn create_user(&self, username: &str, password: &str) -> Result<i64, AuthError>;

    /// Returns the user whose username and password both match exactly.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    async fn update_password(&self, id: i64, new_password: &str) -> Result<(), AuthError>;

    async fn delete_user(&self, id: i64) -> Result<(), AuthError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;
}

pub struct SqliteCredentialStore {
    db: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    #[instrument(skip(self))]
    async fn initialize(&self) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        debug!("users table ready");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn create_user(&self, username: &str, password: &str) -> Result<i64, AuthError> {
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            warn!(%username, "username already registered");
            return Err(AuthError::DuplicateUsername);
        }

        // The UNIQUE constraint still decides if another writer got in first.
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            "#,
        )
        .bind(username)
        .bind(password)
        .execute(&mut *tx)
        .await
        .map_err(AuthError::from_insert)?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        info!(user_id = id, %username, "user registered");
        Ok(id)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ? AND password = ?
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.db)
        .await?;

        match user {
            Some(user) => {
                info!(user_id = user.id, %username, "user logged in");
                Ok(user)
            }
            None => {
                warn!(%username, "login rejected");
                Err(AuthError::NotFound)
            }
        }
    }

    #[instrument(skip(self, new_password))]
    async fn update_password(&self, id: i64, new_password: &str) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = ?
            WHERE id = ?
            "#,
        )
        .bind(new_password)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            warn!(user_id = id, "password update matched no user");
        } else {
            info!(user_id = id, "password updated");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i64) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            warn!(user_id = id, "delete matched no user");
        } else {
            info!(user_id = id, "user deleted");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}
