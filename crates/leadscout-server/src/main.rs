mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leadscout_fetch::{FetchClient, ProxyPool};
use leadscout_pipeline::{DirectoryAdapter, LeadSearch, SourceAdapter};
use leadscout_validate::LeadValidator;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(leadscout_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let fleet = if config.fleet_path.exists() {
        leadscout_core::load_fleet(&config.fleet_path)?.proxies
    } else {
        tracing::warn!(
            path = %config.fleet_path.display(),
            "no proxy fleet file; all fetches will go direct"
        );
        Vec::new()
    };
    let pool = Arc::new(ProxyPool::from_specs(fleet, config.proxy_block_threshold));
    let fetch = Arc::new(FetchClient::from_app_config(Arc::clone(&pool), &config));

    let adapters: Vec<Arc<dyn SourceAdapter>> = config
        .directory_base_urls
        .iter()
        .enumerate()
        .map(|(i, base)| {
            Arc::new(DirectoryAdapter::new(
                format!("directory-{}", i + 1),
                base.clone(),
                Arc::clone(&fetch),
            )) as Arc<dyn SourceAdapter>
        })
        .collect();
    if adapters.is_empty() {
        tracing::warn!("no directory sources configured; searches will fail until some are");
    }

    let state = AppState {
        search: Arc::new(LeadSearch::new(adapters, config.max_concurrent_adapters)),
        validator: Arc::new(LeadValidator::with_builtin_reference()),
        fetch: Arc::clone(&fetch),
        probe_url: config.proxy_probe_url.clone(),
    };

    let _scheduler =
        scheduler::build_scheduler(Arc::clone(&fetch), config.proxy_reset_interval_secs).await?;

    let auth = AuthState::from_env(matches!(
        config.env,
        leadscout_core::Environment::Development
    ))?;
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
