use thiserror::Error;

/// Failures surfaced by the credential store and the sign-in flows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUsername,

    #[error("no user matches the supplied credentials")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AuthError {
    /// Converts an insert failure, treating a unique-constraint violation as a
    /// duplicate registration.
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateUsername
            }
            _ => Self::Storage(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_insert_errors_stay_storage_errors() {
        let err = AuthError::from_insert(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(err.to_string().starts_with("storage error"));
    }

    #[test]
    fn invalid_input_carries_reason() {
        let err = AuthError::InvalidInput("Please fill in both fields");
        assert_eq!(err.to_string(), "invalid input: Please fill in both fields");
    }
}
