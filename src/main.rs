use anyhow::Result;
use project_tracker::application::{ports::cache::CacheStore, services::ApplicationServices};
use project_tracker::application::ports::time::Clock;
use project_tracker::config::AppConfig;
use project_tracker::domain::audit::AuditEventRepository;
use project_tracker::infrastructure::{
    cache::{InMemoryCacheStore, RedisCacheStore},
    database,
    repositories::{InMemoryAuditEventRepository, PostgresAuditEventRepository},
    time::SystemClock,
};
use project_tracker::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let audit_repo: Arc<dyn AuditEventRepository> = match config.database_url() {
        Some(url) => {
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("audit events stored in postgres");
            Arc::new(PostgresAuditEventRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, audit events are kept in memory only");
            Arc::new(InMemoryAuditEventRepository::new())
        }
    };

    let cache_store: Arc<dyn CacheStore> = match config.redis_url() {
        Some(url) => {
            tracing::info!("read cache backed by redis");
            Arc::new(RedisCacheStore::from_url(url)?)
        }
        None => {
            tracing::warn!("REDIS_URL not set, using a process-local cache");
            Arc::new(InMemoryCacheStore::new())
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        audit_repo,
        cache_store,
        config.cache_ttls().clone(),
        clock,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
