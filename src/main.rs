//! Bookcafe Server - bookstore and cafe demo backend

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookcafe_server::{
    api,
    config::AppConfig,
    repository::{JsonStore, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookcafe_server={},tower_http=debug", config.logging.level).into());
    let json = config.logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Bookcafe Server v{}", env!("CARGO_PKG_VERSION"));

    // The data directory must exist before anything is read or written
    let store = JsonStore::from_config(&config.storage);
    store
        .init()
        .await
        .with_context(|| format!("Failed to create data directory {}", store.dir().display()))?;

    tracing::info!("Using data directory {}", store.dir().display());

    let services = Services::new(Repository::new(store));

    if config.seed.enabled {
        services.catalog.seed_if_empty().await?;
    }

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, services);
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
