use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use classeviva_gateway::utils::logger::init_logger;
use classeviva_gateway::{build_router, AppState, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (also reads .env, so RUST_LOG from there applies)
    let settings = Settings::load()?;

    init_logger()?;
    info!("🚀 Starting ClasseViva gateway...");
    info!(
        "✅ Configuration loaded (session ttl {}s, upstream {})",
        settings.session.ttl_seconds, settings.upstream.base_url
    );

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::from_settings(settings)?;
    let app = build_router(state);

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
