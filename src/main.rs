use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fellowship::config::{Cli, Config};
use fellowship::routes;
use fellowship::state::AppState;
use fellowship::storage::{seed, MemStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    let mut storage = MemStorage::new();
    if config.storage.seed {
        seed::load(&mut storage)?;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, storage);
    let app = routes::router(state);

    tracing::info!("Fellowship listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
