use std::sync::Arc;

use anyhow::Context;
use news_analyzer::api::{AppState, router};
use news_analyzer::core::config::AppConfig;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    news_analyzer::setup_logging();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("loading configuration")?;
    let state = AppState::from_config(&config).context("building application state")?;
    let dispatcher = Arc::clone(&state.dispatcher);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, mode = ?config.basic_mode, "Skill server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dispatcher.shutdown().await;
    Ok(())
}
