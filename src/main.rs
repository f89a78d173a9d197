use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use mudo_backend::{config::Settings, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let settings = Settings::load().context("invalid environment configuration")?;
    tracing::info!(webhook = ?settings.target, "using n8n webhook {}", settings.webhook_url());

    let port = settings.port;
    let state = Arc::new(AppState::new(settings).context("failed to build webhook client")?);

    // Frontend is deployed separately, any origin may call us.
    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    tracing::info!("MuDo backend running at http://0.0.0.0:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
