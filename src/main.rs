use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;

use jokebook::auth::CredentialStore;
use jokebook::config::AppConfig;
use jokebook::controller::Controller;
use jokebook::db::AppState;
use jokebook::shell::{self, Shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "jokebook=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // stdout belongs to the shell
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = AppConfig::from_env().context("load configuration")?;
    let app_state = AppState::init(config).await?;

    let store: Arc<dyn CredentialStore> = app_state.store.clone();
    let mut shell = Shell::new(Controller::new(store, &app_state.config));

    tracing::info!("jokebook ready");
    shell::run(
        &mut shell,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    Ok(())
}
