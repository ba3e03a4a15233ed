//! legal-rag server binary
//!
//! Run with: cargo run -p legal-rag --bin legal-rag-server -- --port 8000

use std::path::PathBuf;

use clap::Parser;
use legal_rag::{config::CONFIG_PATH_ENV, RagConfig, RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "legal-rag-server", version, about = "Document upload and chat relay server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Bind host (overrides config and environment)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config and environment)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legal_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.llm.model);
    tracing::info!("  - Completion endpoint: {}", config.llm.base_url);
    tracing::info!(
        "  - Chunking: size {} / overlap {}",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!(
        "  - Store: {} (collection '{}')",
        config.store.path.display(),
        config.store.collection
    );
    if config.llm.credential().is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set in the environment or .env; /chat will answer with the fallback message");
    }

    let server = RagServer::new(config).await?;

    tracing::info!("Endpoints:");
    tracing::info!("  GET  /        - Greeting");
    tracing::info!("  POST /upload  - Upload a .docx document");
    tracing::info!("  POST /chat    - Relay a chat message");

    server.start().await?;

    Ok(())
}
