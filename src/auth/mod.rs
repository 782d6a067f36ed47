mod dto;
mod error;
mod repo;
mod repo_types;
pub mod services;

pub use dto::Credentials;
pub use error::AuthError;
pub use repo::{CredentialStore, SqliteCredentialStore};
pub use repo_types::User;
