//! # Warden - Admin Login Backend
//!
//! Captcha-protected login for a single administrative account, with
//! cookie-borne session tokens kept in a key-value cache.
//!
//! ## Flow
//! ```text
//! GET /account/checkCode  → answer cached under captcha key
//! POST /account/login     → captcha consumed, session token cached, cookie set
//! POST /account/logout    → session token deleted, cookie expired
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cache;
mod captcha;
mod config;
mod routes;
mod session;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

/// Warden - admin login backend
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/warden.toml")]
    config: String,

    /// Redis URL (overrides config)
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Admin account identifier (overrides config)
    #[arg(long, env = "ADMIN_ACCOUNT")]
    admin_account: Option<String>,

    /// Admin password as encoded by the client (overrides config)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Use the in-process cache instead of Redis
    #[arg(long, default_value = "false")]
    memory_cache: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!(
        path = %args.config,
        backend = ?config.cache.backend,
        admin = %config.admin.account,
        "Configuration loaded"
    );

    let state = AppState::new(&config).await?;

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Warden listening on {}", config.listen_addr);

    let shutdown_signal = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("Warden shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to install JSON logger")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
            .context("Failed to install logger")?;
    }

    Ok(())
}
