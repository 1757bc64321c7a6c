//! CLI entry point for the drawflow editor server.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use drawflow_core::config::{load_section, DEFAULT_FILE_PREFIX, ENV_PREFIX};
use drawflow_graph::{EditorStore, GraphClient, GraphConfig, MemoryStore};
use drawflow_server::config::ServerConfig;
use drawflow_server::{build_router, AppState};

#[derive(Parser)]
#[command(name = "drawflow-server")]
#[command(about = "HTTP service storing the Drawflow editor document in Dgraph")]
struct Cli {
    /// Config file prefix (default: drawflow).
    #[arg(short, long, default_value = DEFAULT_FILE_PREFIX)]
    config: String,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the Dgraph Alpha HTTP URL.
    #[arg(long)]
    dgraph_url: Option<String>,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = Backend::Dgraph)]
    backend: Backend,

    /// Do not drop existing data at startup.
    #[arg(long)]
    keep_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Dgraph over its HTTP API.
    Dgraph,
    /// Process memory; nothing survives a restart.
    Memory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();

    let mut server_config: ServerConfig = load_section(&cli.config, ENV_PREFIX, "server")?;
    if let Some(port) = cli.port {
        server_config.port = port;
    }
    if cli.keep_data {
        server_config.reset_on_startup = false;
    }
    let addr = server_config.socket_addr()?;

    let store: Arc<dyn EditorStore> = match cli.backend {
        Backend::Dgraph => {
            let mut graph_config: GraphConfig = load_section(&cli.config, ENV_PREFIX, "dgraph")?;
            if let Some(url) = cli.dgraph_url {
                graph_config.url = url;
            }
            Arc::new(GraphClient::connect(&graph_config).await?)
        }
        Backend::Memory => {
            tracing::warn!("Using in-memory store, the editor is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    if server_config.reset_on_startup {
        tracing::warn!("reset_on_startup is enabled: all stored data will be dropped");
    }
    drawflow_graph::initialize(store.as_ref(), server_config.reset_on_startup).await;

    let app = build_router(AppState::new(store), &server_config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, backend = ?cli.backend, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
