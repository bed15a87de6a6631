use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use marquee_api::{app, AppState};
use marquee_store::{app_config::Config, ReservationStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=debug,marquee_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    let store = ReservationStore::new(config.show.settings(Utc::now()))
        .context("Failed to initialize seat table")?;
    tracing::info!(
        "Show '{}' with {} seats",
        config.show.title,
        store.total_seats()
    );

    let app = app(AppState::new(Arc::new(store)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
