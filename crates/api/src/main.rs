use std::sync::Arc;

use campana_ai::{AiConfig, AiGateway};
use campana_api::app::services::{AppServices, ServiceBackend};
use campana_api::config::AppConfig;
use campana_backend::RestBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campana_observability::init();

    let config = AppConfig::from_env()?;

    let backend: Arc<dyn ServiceBackend> = Arc::new(RestBackend::new(
        &config.backend_url,
        &config.backend_service_key,
    ));
    let ai = AiGateway::new(AiConfig::new(
        config.ai_endpoint.clone(),
        config.ai_api_key.clone(),
    ));
    let services = Arc::new(AppServices::new(backend, ai, config.campaign_name.clone()));

    let app = campana_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
