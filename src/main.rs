use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use icadus_api::{
    api::{create_router, AppState},
    config::Config,
    services::{Catalog, CsvFileSource, MoodTable, SocialMatcher},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("icadus_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Icadus API v{}", env!("CARGO_PKG_VERSION"));

    // A missing catalog file yields an empty catalog, not a startup failure
    let source = CsvFileSource::new(&config.catalog_path);
    let catalog = Arc::new(Catalog::load(&source).await?);

    let settings = config.engine_settings();
    info!(?settings, "Engine settings");

    let state = AppState::new(
        catalog,
        MoodTable::default(),
        SocialMatcher::default().with_threshold(config.persona_threshold),
        settings,
        config.rng_seed,
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server running on http://{}", config.bind_address());
    axum::serve(listener, app).await?;

    Ok(())
}
