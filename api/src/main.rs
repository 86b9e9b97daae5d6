mod api_types;
mod config;
mod handlers;
mod request_logging;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use poem::{listener::TcpListener, Server};
use std::path::PathBuf;
use std::sync::Arc;
use store::OpenSearchClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gcb")]
#[command(about = "Gen Con event search API")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the event index template
    Init,
    /// Load events from a CSV export into the index
    Load {
        /// Path to the event CSV file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if it exists
    dotenv::dotenv().ok();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Serve { port } => serve_command(config, port).await,
        Commands::Init => init_command(config).await,
        Commands::Load { file } => load_command(config, file).await,
    }
}

async fn serve_command(config: AppConfig, port: Option<u16>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port.unwrap_or(config.port));
    let store = Arc::new(OpenSearchClient::new(&config));

    tracing::info!("Starting event search API server on {}", addr);
    Server::new(TcpListener::bind(&addr))
        .run(handlers::routes(store))
        .await
        .context("API server failed")
}

async fn init_command(config: AppConfig) -> Result<()> {
    let store = OpenSearchClient::new(&config);
    store.put_index_template().await
}

async fn load_command(config: AppConfig, file: PathBuf) -> Result<()> {
    let loaded = gcb_event::load_events_file(&file)
        .with_context(|| format!("Failed to load events from {}", file.display()))?;

    let store = OpenSearchClient::new(&config);
    let summary = store.write_events(&loaded.events).await?;

    tracing::info!(
        written = summary.written,
        failed = summary.failures.len(),
        dropped_rows = loaded.dropped_rows,
        index = store.index(),
        "Finished loading events"
    );
    if !summary.failures.is_empty() {
        anyhow::bail!(
            "{} events were rejected by the store",
            summary.failures.len()
        );
    }
    Ok(())
}
