//! FitTrack server binary.
//!
//! Serves the REST routes and the GraphQL endpoint from one router.
//!
//! # Configuration
//!
//! Resolution order: CLI flags > environment variables > config file >
//! defaults.
//!
//! Environment variables:
//! - `FITTRACK_PORT`: Port to listen on (default: 3000)
//! - `FITTRACK_STORAGE`: `memory` or `file` (default: memory)
//! - `FITTRACK_DATA_DIR`: Directory for collection files, file mode only
//! - `FITTRACK_CONFIG`: Path to config file
//!   (default: ~/.config/fittrack/config.yaml)

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::config::Config;
use fittrack::server::AppState;
use fittrack::store::{RecordStore, StorageMode};

#[derive(Parser)]
#[command(name = "fittrack-server")]
#[command(version)]
#[command(about = "A fitness tracking backend server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Persistence mode: memory or file
    #[arg(long)]
    storage: Option<StorageMode>,

    /// Directory for collection files (file mode)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var("FITTRACK_CONFIG").map(PathBuf::from).ok());

    let mut config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = match config.storage {
        StorageMode::Memory => {
            tracing::info!("Using in-memory storage; state is lost on restart");
            RecordStore::in_memory()
        }
        StorageMode::File => {
            if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
                tracing::error!(
                    "Failed to create data directory {}: {}",
                    config.data_dir.display(),
                    e
                );
                std::process::exit(1);
            }
            tracing::info!("Data directory: {}", config.data_dir.display());
            RecordStore::open(&config.data_dir)
        }
    };

    let state = AppState::new(store);
    let app = fittrack::server::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("REST server on http://{}", addr);
    tracing::info!("GraphQL endpoint on http://{}/graphql", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
