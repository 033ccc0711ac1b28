use std::sync::Arc;

use clap::{Parser, Subcommand};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};

use glue_mcp::catalog::{CatalogSource, GlueCatalog, SharedCatalog, StaticCatalog};
use glue_mcp::config::{SecurityConfig, FIXTURE_ENV};
use glue_mcp::{api, mcp, telemetry};

const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "glue-mcp")]
#[command(about = "Browse AWS Glue Data Catalog metadata over MCP and HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the REST API, MCP over streamable HTTP, and Prometheus metrics
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = DEFAULT_BIND)]
        bind: String,
    },
    /// Start MCP server via stdio (for agent integration)
    Mcp,
    /// Verify catalog connectivity and exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // MCP mode needs stderr for logging since stdout is the protocol channel
    let use_stderr = matches!(cli.command, Some(Commands::Mcp));
    telemetry::init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve { bind }) => serve(&bind).await?,
        Some(Commands::Mcp) => {
            let catalog = open_catalog().await?;
            mcp::run_stdio_server(catalog).await?;
        }
        Some(Commands::Check) => {
            let catalog = open_catalog().await?;
            let databases = catalog.list_databases().await?;
            println!("Catalog reachable: {} database(s)", databases.len());
        }
        None => serve(DEFAULT_BIND).await?,
    }

    Ok(())
}

/// Open the catalog backend: a JSON fixture when `GLUE_MCP_FIXTURE` is set,
/// otherwise AWS Glue via the default credential chain.
async fn open_catalog() -> anyhow::Result<SharedCatalog> {
    match std::env::var(FIXTURE_ENV) {
        Ok(path) => {
            tracing::info!("Serving fixture catalog from {}", path);
            Ok(Arc::new(StaticCatalog::from_path(&path)?))
        }
        Err(_) => {
            let catalog = GlueCatalog::from_env().await;
            tracing::info!(
                "Connecting to AWS Glue in {}",
                catalog.region().unwrap_or_else(|| "default region".into())
            );
            Ok(Arc::new(catalog))
        }
    }
}

async fn serve(bind: &str) -> anyhow::Result<()> {
    let metrics_handle = telemetry::install_metrics()?;
    let catalog = open_catalog().await?;
    let security = SecurityConfig::from_env();

    let mcp_service = StreamableHttpService::new(
        {
            let catalog = catalog.clone();
            move || Ok(mcp::McpServer::new(catalog.clone()))
        },
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = api::create_router(catalog, security)
        .nest_service("/mcp", mcp_service)
        .route(
            "/metrics",
            axum::routing::get(move || std::future::ready(metrics_handle.render())),
        );

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("glue-mcp listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received, stopping server");
    }
}
