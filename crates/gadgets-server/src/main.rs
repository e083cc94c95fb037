mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use gadgets_catalog::{HttpCatalog, InMemoryCatalog, ProductRepository};
use gadgets_core::AppConfig;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gadgets_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting gadgets server");

    if let Some(dir) = &config.fixtures_dir {
        let catalog = InMemoryCatalog::load_dir(dir, config.featured_limit)
            .with_context(|| format!("failed to load catalog fixtures from {}", dir.display()))?;
        return serve(&config, catalog).await;
    }

    let Some(base_url) = &config.catalog_base_url else {
        anyhow::bail!("set GADGETS_CATALOG_BASE_URL or GADGETS_FIXTURES_DIR to choose a catalog");
    };
    let catalog = HttpCatalog::new(
        base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.featured_limit,
    )?;
    serve(&config, catalog).await
}

async fn serve<R: ProductRepository + 'static>(config: &AppConfig, catalog: R) -> anyhow::Result<()> {
    let app = build_app(AppState::new(Arc::new(catalog), config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
