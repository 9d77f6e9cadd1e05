//! Consult API server binary.
//!
//! Serves the chat API over a PostgreSQL message store, or over an in-memory
//! store when no database URL is configured.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use consult_core::store::{MemoryMessageStore, PgMessageStore};
use consult_core::{MessageStore, ReplyStyle};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "consult_api_server", version, about = "Consult API server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3100)]
    port: u16,

    /// PostgreSQL connection URL. Messages are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Default reply profile for `POST /api/chat` (full or compact).
    #[arg(long)]
    profile: Option<ReplyStyle>,

    /// Override the profile thinking delay, in milliseconds.
    #[arg(long)]
    thinking_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,consult_api=debug,consult_core=debug"))?,
        )
        .init();

    let args = Args::parse();

    let mut config = consult_api::config::ApiConfig::from_env();
    config.bind_addr = format!("{}:{}", args.host, args.port);
    if let Some(profile) = args.profile {
        config.default_profile = profile;
    }
    if let Some(ms) = args.thinking_delay_ms {
        config.thinking_delay = Some(Duration::from_millis(ms));
    }

    info!(
        bind_addr = %config.bind_addr,
        profile = %config.default_profile,
        "starting consult_api_server"
    );

    let store: Arc<dyn MessageStore> = match &args.database_url {
        Some(url) => {
            info!(max_connections = args.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(url)
                .await?;

            info!("running database migrations");
            Arc::new(PgMessageStore::migrated(pool).await?)
        }
        None => {
            warn!("DATABASE_URL not set; messages are kept in memory only");
            Arc::new(MemoryMessageStore::new())
        }
    };

    let state = consult_api::AppState::new(store, config.clone());
    let app = consult_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("consult_api_server stopped");
    Ok(())
}

/// Resolves on SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; draining connections");
}
