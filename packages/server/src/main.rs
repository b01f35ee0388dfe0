use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::FilesystemImageStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transformer_registry::config::AppConfig;
use transformer_registry::database::init_db;
use transformer_registry::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transformer_registry=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connected and schema synced");

    let images = FilesystemImageStore::new(&config.storage)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.storage.upload_dir.display()
            )
        })?;
    info!(
        dir = %images.upload_dir().display(),
        prefix = %config.storage.normalized_prefix(),
        "Serving uploads"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let state = AppState {
        db,
        images: Arc::new(images),
        config,
    };
    let app = transformer_registry::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
