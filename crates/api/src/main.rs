//! AdSync - ad account and campaign mirror
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use adsync_server::utils::logging::init_tracing;
use adsync_server::{router, AppContext};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    init_tracing();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let config = adsync_infra::config::load().context("failed to load configuration")?;
    let bind_addr = config.server.bind_addr.clone();

    let ctx = AppContext::new_with_config(config).context("failed to initialise application")?;
    let app = router(Arc::new(ctx));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "adsync listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
