use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use prompt_capture::routes::{create_router, AppState};
use prompt_capture::utils::init_logger;
use prompt_capture::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory if present, otherwise rely on the environment
    dotenvy::dotenv().ok();

    // Load configuration first (needed for logger initialization)
    let settings = Settings::new()?;

    init_logger(&settings)?;

    info!("🚀 Prompt capture service starting...");

    if let Err(e) = settings.validate() {
        error!("❌ Configuration validation failed: {}", e);
        return Err(e.into());
    }
    info!(
        strategy = %settings.similarity.strategy,
        blank_pair_policy = ?settings.similarity.blank_pair_policy,
        duplicate_threshold = settings.similarity.duplicate_threshold,
        "✅ Configuration validated"
    );

    let request_timeout = Duration::from_millis(settings.server.request_timeout);
    let bind_addr = settings.bind_address();
    let state = AppState::new(Arc::new(settings));

    let app = create_router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!("🚀 Server ready on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("👋 Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
