//! Showbook server binary

mod config;
mod logging;

use anyhow::{Context, Result};
use booking_service::BookingModule;
use clap::{Parser, Subcommand};
use config::AppConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Debug, Parser)]
#[command(name = "showbook-server", version, about = "Venue, artist and show booking directory")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config/showbook.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Print the effective configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(&cli.config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Check => {
            println!("{:#?}", cfg.redacted());
            Ok(())
        }
        Command::Migrate => {
            let _guard = logging::init(&cfg.logging)?;
            let db = connect(&cfg).await?;
            booking_service::module::migrate(&db).await
        }
        Command::Serve => {
            let _guard = logging::init(&cfg.logging)?;
            serve(cfg).await
        }
    }
}

async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.database.url.clone());
    opts.max_connections(cfg.database.max_connections)
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.database.redacted_url()))
}

async fn serve(cfg: AppConfig) -> Result<()> {
    let db = Arc::new(connect(&cfg).await?);
    let module = BookingModule::init(cfg.booking.clone(), db).await?;

    let app = module
        .router()?
        .nest_service("/static", ServeDir::new(&cfg.server.static_dir))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(addr = %cfg.server.bind_addr, "showbook-server listening");

    let cancel = CancellationToken::new();
    tokio::spawn(wait_for_shutdown_signal(cancel.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .context("server failed")?;

    tracing::info!("showbook-server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown requested");
    cancel.cancel();
}
