use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::SystemClock;
use common::storage::filesystem::FilesystemFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blog_server::config::AppConfig;
use blog_server::database::init_db;
use blog_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database schema synchronized");

    let images = FilesystemFileStore::new(config.storage.images_dir.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare images directory {}",
                config.storage.images_dir.display()
            )
        })?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        images: Arc::new(images),
        clock: Arc::new(SystemClock),
    };
    let app = blog_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
