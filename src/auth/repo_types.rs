use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,          // assigned by AUTOINCREMENT, never reused
    pub username: String, // unique, compared byte for byte
    #[serde(skip_serializing)]
    pub password: String, // stored as entered
}
