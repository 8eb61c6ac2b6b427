//! lectio-server - reading progress HTTP API

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use lectio_core::{Config, Database, Journal};
use lectio_server::AppState;

#[derive(Parser, Debug)]
#[command(name = "lectio-server")]
#[command(about = "Reading progress tracker - HTTP API")]
#[command(version)]
struct Args {
    /// Address to bind (overrides [server] host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides [server] port)
    #[arg(long)]
    port: Option<u16>,

    /// Database file (default: $XDG_DATA_HOME/lectio/entries.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Don't seed sample entries into an empty database
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    let _log_guard =
        lectio_core::logging::init(&config.logging).context("failed to initialize logging")?;
    tracing::info!("lectio-server starting");

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid server settings")?;

    let db_path = args.db.unwrap_or_else(Config::database_path);
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    db.migrate().context("failed to run migrations")?;

    let day_offset = config.analytics.day_offset()?;
    let journal = Journal::new(db).with_day_offset(day_offset);

    if config.store.seed_when_empty && !args.no_seed {
        let seeded = journal.seed_if_empty().context("failed to seed database")?;
        if seeded > 0 {
            println!("Seeded {} sample entries", seeded);
        }
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    println!("lectio-server listening on http://{}", listener.local_addr()?);
    println!(
        "Logging to {}",
        lectio_core::logging::log_file_path(Utc::now().date_naive()).display()
    );

    lectio_server::serve(listener, AppState::new(journal), shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("Failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
