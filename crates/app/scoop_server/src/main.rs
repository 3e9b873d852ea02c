//! Scoop catalog API server binary.
//!
//! Serves the REST API over PostgreSQL and Redis, or entirely in memory
//! with `--memory` for local development.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use scoop_api::AppState;
use scoop_api::config::{ApiConfig, with_database_name};
use scoop_core::repository::memory::{MemoryProductRepository, MemoryUserRepository};
use scoop_core::repository::postgres::{PgProductRepository, PgUserRepository};
use scoop_core::repository::{ProductRepository, UserRepository};
use scoop_core::session::SessionCache;
use scoop_core::session::memory::MemorySessionCache;
use scoop_core::session::redis::RedisSessionCache;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How often expired sessions are swept in `--memory` mode.
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "scoop_server", version, about = "Scoop catalog API server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/scoop"
    )]
    database_url: String,

    /// Database name, replacing the one in the connection URL.
    #[arg(long, env = "DATABASE_NAME")]
    database_name: Option<String>,

    /// Redis connection URL for the session cache.
    #[arg(long, env = "REDIS_URL", default_value = "redis://localhost:6379")]
    redis_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep users, products and sessions in process memory. Nothing persists.
    #[arg(long, default_value_t = false)]
    memory: bool,
}

type Backends = (
    Arc<dyn UserRepository>,
    Arc<dyn ProductRepository>,
    Arc<dyn SessionCache>,
);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,scoop_api=debug,scoop_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env()?;
    config.bind_addr = format!("{}:{}", args.host, args.port);
    config.database_url = match args.database_name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => with_database_name(&args.database_url, name)?,
        None => args.database_url.clone(),
    };
    config.redis_url = args.redis_url.clone();

    info!(
        bind_addr = %config.bind_addr,
        environment = %config.environment,
        app_name = %config.app_name,
        memory = args.memory,
        "starting scoop_server"
    );

    let shutdown = CancellationToken::new();

    let (users, products, cache) = if args.memory {
        warn!("memory mode: data is lost on exit");
        memory_backends(shutdown.clone())
    } else {
        persistent_backends(&config, args.max_connections).await?
    };

    let state = AppState::new(config.clone(), users, products, cache)?;
    let app = scoop_api::router(state)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .await?;

    shutdown.cancel();
    info!("server stopped");
    Ok(())
}

async fn persistent_backends(
    config: &ApiConfig,
    max_connections: u32,
) -> Result<Backends, Box<dyn std::error::Error>> {
    info!(max_connections, "configuring connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    scoop_api::migrate(&pool).await?;

    info!("connecting to session cache");
    let cache: Arc<dyn SessionCache> =
        Arc::new(RedisSessionCache::connect(&config.redis_url).await?);

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let products: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool));
    Ok((users, products, cache))
}

fn memory_backends(shutdown: CancellationToken) -> Backends {
    let cache = Arc::new(MemorySessionCache::new());

    tokio::spawn({
        let cache = cache.clone();
        async move {
            let mut ticker = tokio::time::interval(PURGE_INTERVAL);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let purged = cache.purge_expired().await;
                        if purged > 0 {
                            debug!(purged, "expired sessions purged");
                        }
                    }
                }
            }
        }
    });

    let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
    let products: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());
    let cache: Arc<dyn SessionCache> = cache;
    (users, products, cache)
}
