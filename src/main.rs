use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cineai_api::api::{create_router, AppState};
use cineai_api::config::Config;
use cineai_api::services::providers::anthropic::AnthropicProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cineai_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let provider = Arc::new(AnthropicProvider::new(&config));
    let state = AppState::new(provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, model = %config.model, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
