use std::sync::Arc;

use anyhow::Context;
use storefront_api::config::ServerConfig;
use storefront_products::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let catalog = Arc::new(Catalog::demo().context("failed to build demo catalog")?);
    tracing::info!(products = catalog.len(), "catalog loaded");

    let app = storefront_api::app::build_app(catalog, &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
