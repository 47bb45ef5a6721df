use anyhow::Context;
use tokio_util::sync::CancellationToken;

use hotelbook_api::app;
use hotelbook_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;

    hotelbook_observability::init(config.log_format);

    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let repository = app::build_repository(&config.store)
        .await
        .context("failed to open booking store")?;

    let shutdown = CancellationToken::new();
    let router = app::build_app(&config, repository, shutdown.clone());

    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM, cancelling every in-flight request scope.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
    shutdown.cancel();
}
