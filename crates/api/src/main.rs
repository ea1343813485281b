use std::sync::Arc;

use anyhow::Context;

use catalog_api::app::{build_app, services::build_services};
use catalog_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    catalog_observability::init(config.log_format);

    if config.jwt_secret_is_default {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let services = build_services(&config).await?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
