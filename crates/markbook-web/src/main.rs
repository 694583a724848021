//! Markbook Web Server
//!
//! Run with: cargo run -p markbook-web

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use markbook_config::Config;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load().context("failed to load markbook configuration")?;
    info!(
        timeout_secs = config.session.timeout_secs,
        "starting Markbook web server"
    );

    let state = Arc::new(markbook_web::state::AppState::new(&config));
    markbook_web::session::spawn_sweeper(
        state.clone(),
        Duration::from_secs(config.session.sweep_interval_secs),
    );

    let app = markbook_web::router::build_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server.host / server.port")?;
    info!("server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
