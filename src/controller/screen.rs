use crate::jokes::CategoryId;

/// Every screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Entry,
    Login,
    SignUp,
    Categories,
    CategoryJokes(CategoryId),
    UpdatePassword,
}

impl Screen {
    /// Screens that only make sense with someone logged in.
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Screen::Categories | Screen::CategoryJokes(_) | Screen::UpdatePassword
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Entry => "Jokes Library",
            Screen::Login => "Login",
            Screen::SignUp => "Sign Up",
            Screen::Categories => "Select a Joke Category",
            Screen::CategoryJokes(id) => id.as_str(),
            Screen::UpdatePassword => "Update Your Password",
        }
    }
}
