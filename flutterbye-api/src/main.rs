use std::net::SocketAddr;
use anyhow::Context;
use flutterbye_api::{app, AppState};
use flutterbye_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flutterbye_api=debug,flutterbye_catalog=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Flutterbye pricing API on port {}", config.server.port);

    let app_state = AppState::from_config(&config)?;
    tracing::info!(
        "Loaded {} catalog products (confidence jitter: {})",
        app_state.catalog.len(),
        config.pricing.confidence_jitter
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
