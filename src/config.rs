use std::str::FromStr;

use serde::Deserialize;

/// Which kind of identifier the login form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginField {
    Username,
    Email,
}

/// What a second tap on an already favorited joke does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteMode {
    /// Favorites are only ever added.
    Latch,
    /// A second tap removes the joke again.
    Toggle,
}

impl FromStr for LoginField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            other => anyhow::bail!("unknown LOGIN_FIELD {other:?}, expected username or email"),
        }
    }
}

impl FromStr for FavoriteMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latch" => Ok(Self::Latch),
            "toggle" => Ok(Self::Toggle),
            other => anyhow::bail!("unknown FAVORITE_MODE {other:?}, expected latch or toggle"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub login_field: LoginField,
    pub favorite_mode: FavoriteMode,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://JokesAppDB.db";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            login_field: LoginField::Username,
            favorite_mode: FavoriteMode::Latch,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let login_field = lookup("LOGIN_FIELD")
            .map(|v| v.parse::<LoginField>())
            .transpose()?
            .unwrap_or(LoginField::Username);
        let favorite_mode = lookup("FAVORITE_MODE")
            .map(|v| v.parse::<FavoriteMode>())
            .transpose()?
            .unwrap_or(FavoriteMode::Latch);
        Ok(Self {
            database_url,
            login_field,
            favorite_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]).expect("defaults should load");
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.login_field, LoginField::Username);
        assert_eq!(cfg.favorite_mode, FavoriteMode::Latch);
    }

    #[test]
    fn reads_overrides_case_insensitively() {
        let cfg = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("LOGIN_FIELD", "Email"),
            ("FAVORITE_MODE", " TOGGLE "),
        ])
        .expect("overrides should load");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.login_field, LoginField::Email);
        assert_eq!(cfg.favorite_mode, FavoriteMode::Toggle);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = config_from(&[("FAVORITE_MODE", "sometimes")]).unwrap_err();
        assert!(err.to_string().contains("FAVORITE_MODE"));
        assert!(config_from(&[("LOGIN_FIELD", "phone")]).is_err());
    }
}
