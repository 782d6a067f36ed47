use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::auth::dto::Credentials;
use crate::auth::error::AuthError;
use crate::config::LoginField;

pub const MSG_FILL_BOTH: &str = "Please fill in both fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_BLANK_PASSWORD: &str = "Please enter a new password";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks a sign-up form before anything touches the database.
pub fn validate_sign_up(field: LoginField, creds: &Credentials) -> Result<(), AuthError> {
    if creds.username.trim().is_empty() || creds.password.trim().is_empty() {
        return Err(AuthError::InvalidInput(MSG_FILL_BOTH));
    }
    if field == LoginField::Email && !is_valid_email(&creds.username) {
        warn!(email = %creds.username, "invalid email");
        return Err(AuthError::InvalidInput(MSG_INVALID_EMAIL));
    }
    Ok(())
}

pub fn validate_new_password(password: &str) -> Result<(), AuthError> {
    if password.trim().is_empty() {
        return Err(AuthError::InvalidInput(MSG_BLANK_PASSWORD));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("al ice@example.com"));
    }

    #[test]
    fn sign_up_requires_both_fields() {
        let err = validate_sign_up(LoginField::Username, &Credentials::new("alice", "")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(MSG_FILL_BOTH)));
        assert!(validate_sign_up(LoginField::Username, &Credentials::new("  ", "pw")).is_err());
        assert!(validate_sign_up(LoginField::Username, &Credentials::new("alice", "pw")).is_ok());
    }

    #[test]
    fn email_field_requires_email_shape() {
        let plain = Credentials::new("alice", "pw");
        let err = validate_sign_up(LoginField::Email, &plain).unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let email = Credentials::new("alice@example.com", "pw");
        assert!(validate_sign_up(LoginField::Email, &email).is_ok());
    }

    #[test]
    fn new_password_must_not_be_blank() {
        assert!(validate_new_password("").is_err());
        assert!(validate_new_password("   ").is_err());
        assert!(validate_new_password("pw2").is_ok());
    }
}
