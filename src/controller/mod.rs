//! In-memory app state: the current screen, the session, the form and the
//! favorites list. Every credential operation ends up here as a message
//! string; nothing is returned to the shell as an error.

mod favorites;
mod screen;

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::auth::services::{validate_new_password, validate_sign_up};
pub use crate::auth::services::{MSG_BLANK_PASSWORD, MSG_FILL_BOTH, MSG_INVALID_EMAIL};
use crate::auth::{AuthError, CredentialStore, Credentials, User};
use crate::config::{AppConfig, LoginField};

pub use favorites::Favorites;
pub use screen::Screen;

pub const MSG_DUPLICATE: &str = "Username already exists";
pub const MSG_BAD_LOGIN: &str = "Invalid username or password";
pub const MSG_SIGN_UP_FAILED: &str = "Could not add user. Please try again later.";
pub const MSG_LOGIN_FAILED: &str = "Could not log in. Please try again later.";
pub const MSG_UPDATE_FAILED: &str = "Failed to update password.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete account.";
pub const MSG_NOT_LOGGED_IN: &str = "Please log in first";
pub const MSG_ACCOUNT_GONE: &str = "Your account no longer exists. Please sign up again.";
pub const MSG_SIGNED_UP: &str = "Account created. You can log in now.";
pub const MSG_PASSWORD_UPDATED: &str = "Password updated successfully!";
pub const MSG_ACCOUNT_DELETED: &str = "Account deleted successfully!";

pub struct Controller {
    store: Arc<dyn CredentialStore>,
    login_field: LoginField,
    screen: Screen,
    session: Option<User>,
    favorites: Favorites,
    form: Credentials,
    error: Option<String>,
    notice: Option<String>,
    favorites_open: bool,
    confirm_delete: bool,
}

impl Controller {
    pub fn new(store: Arc<dyn CredentialStore>, config: &AppConfig) -> Self {
        Self {
            store,
            login_field: config.login_field,
            screen: Screen::Entry,
            session: None,
            favorites: Favorites::new(config.favorite_mode),
            form: Credentials::default(),
            error: None,
            notice: None,
            favorites_open: false,
            confirm_delete: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn form(&self) -> &Credentials {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn login_field(&self) -> LoginField {
        self.login_field
    }

    pub fn favorites_open(&self) -> bool {
        self.favorites_open
    }

    pub fn confirm_delete_pending(&self) -> bool {
        self.confirm_delete
    }

    /// Switches to `screen`. There is no history; each screen knows its own way back.
    pub fn navigate(&mut self, screen: Screen) {
        if screen.requires_session() && self.session.is_none() {
            warn!(?screen, "navigation without a session");
            self.screen = Screen::Entry;
            self.error = Some(MSG_NOT_LOGGED_IN.into());
            return;
        }
        self.screen = screen;
        self.form.clear();
        self.error = None;
        self.notice = None;
        self.confirm_delete = false;
    }

    /// Shows `message` on the error line until the next successful action.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn toggle_favorite(&mut self, joke: &str) -> bool {
        self.favorites.toggle(joke)
    }

    pub fn is_favorite(&self, joke: &str) -> bool {
        self.favorites.contains(joke)
    }

    pub fn list_favorites(&self) -> &[String] {
        self.favorites.list()
    }

    pub fn toggle_favorites_modal(&mut self) {
        self.favorites_open = !self.favorites_open;
    }

    #[instrument(skip(self))]
    pub async fn sign_up(&mut self) {
        self.notice = None;
        if let Err(e) = validate_sign_up(self.login_field, &self.form) {
            self.report(e, MSG_SIGN_UP_FAILED);
            return;
        }

        match self
            .store
            .create_user(&self.form.username, &self.form.password)
            .await
        {
            Ok(_) => {
                self.form.clear();
                self.error = None;
                self.screen = Screen::Entry;
                self.notice = Some(MSG_SIGNED_UP.into());
            }
            Err(e) => self.report(e, MSG_SIGN_UP_FAILED),
        }
    }

    #[instrument(skip(self))]
    pub async fn login(&mut self) {
        self.notice = None;
        match self
            .store
            .authenticate(&self.form.username, &self.form.password)
            .await
        {
            Ok(user) => {
                info!(user_id = user.id, "session started");
                self.session = Some(user);
                self.form.clear();
                self.error = None;
                self.screen = Screen::Categories;
            }
            Err(e) => self.report(e, MSG_LOGIN_FAILED),
        }
    }

    /// Stores the password currently in the form for the logged-in user.
    #[instrument(skip(self))]
    pub async fn update_password(&mut self) {
        self.notice = None;
        if let Err(e) = validate_new_password(&self.form.password) {
            self.report(e, MSG_UPDATE_FAILED);
            return;
        }
        let Some(id) = self.live_session_id(MSG_UPDATE_FAILED).await else {
            return;
        };

        let new_password = self.form.password.clone();
        match self.store.update_password(id, &new_password).await {
            Ok(()) => {
                if let Some(user) = self.session.as_mut() {
                    user.password = new_password;
                }
                self.form.password.clear();
                self.error = None;
                self.notice = Some(MSG_PASSWORD_UPDATED.into());
            }
            Err(e) => self.report(e, MSG_UPDATE_FAILED),
        }
    }

    /// Asks for confirmation before the account is removed.
    pub fn request_delete_account(&mut self) {
        if self.session.is_none() {
            self.error = Some(MSG_NOT_LOGGED_IN.into());
            return;
        }
        self.confirm_delete = true;
    }

    pub fn cancel_delete_account(&mut self) {
        self.confirm_delete = false;
    }

    #[instrument(skip(self))]
    pub async fn confirm_delete_account(&mut self) {
        if !self.confirm_delete {
            return;
        }
        self.confirm_delete = false;
        let Some(id) = self.live_session_id(MSG_DELETE_FAILED).await else {
            return;
        };

        match self.store.delete_user(id).await {
            Ok(()) => {
                self.end_session();
                self.notice = Some(MSG_ACCOUNT_DELETED.into());
            }
            Err(e) => self.report(e, MSG_DELETE_FAILED),
        }
    }

    pub fn logout(&mut self) {
        self.end_session();
    }

    /// Id of the logged-in user, once the row is confirmed to still exist.
    /// A vanished row ends the session.
    async fn live_session_id(&mut self, storage_message: &str) -> Option<i64> {
        let Some(id) = self.session.as_ref().map(|u| u.id) else {
            self.error = Some(MSG_NOT_LOGGED_IN.into());
            return None;
        };
        match self.store.find_by_id(id).await {
            Ok(Some(_)) => Some(id),
            Ok(None) => {
                warn!(user_id = id, "session user no longer stored");
                self.end_session();
                self.error = Some(MSG_ACCOUNT_GONE.into());
                None
            }
            Err(e) => {
                self.report(e, storage_message);
                None
            }
        }
    }

    fn end_session(&mut self) {
        if let Some(user) = self.session.take() {
            info!(user_id = user.id, "session ended");
        }
        self.favorites.clear();
        self.favorites_open = false;
        self.confirm_delete = false;
        self.form.clear();
        self.error = None;
        self.notice = None;
        self.screen = Screen::Entry;
    }

    fn report(&mut self, err: AuthError, storage_message: &str) {
        let message = match err {
            AuthError::DuplicateUsername => MSG_DUPLICATE,
            AuthError::NotFound => MSG_BAD_LOGIN,
            AuthError::InvalidInput(reason) => reason,
            AuthError::Storage(ref e) => {
                error!(error = %e, "credential store failed");
                storage_message
            }
        };
        self.error = Some(message.to_string());
    }
}
