//! Environment configuration.

use anyhow::Context;

/// Service configuration, read once at startup.
///
/// The backend pair is mandatory (the service is useless without its system
/// of record); missing AI configuration only degrades the assistant to its
/// fallback copy.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub backend_url: String,
    pub backend_service_key: String,
    pub ai_endpoint: String,
    pub ai_api_key: String,
    pub campaign_name: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url =
            std::env::var("BACKEND_URL").context("BACKEND_URL is required")?;
        let backend_service_key =
            std::env::var("BACKEND_SERVICE_KEY").context("BACKEND_SERVICE_KEY is required")?;

        let ai_endpoint = std::env::var("AI_ENDPOINT").unwrap_or_default();
        let ai_api_key = std::env::var("AI_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("AI_API_KEY not set; assistant answers degrade to fallback copy");
            String::new()
        });

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            backend_url,
            backend_service_key,
            ai_endpoint,
            ai_api_key,
            campaign_name: std::env::var("CAMPAIGN_NAME")
                .unwrap_or_else(|_| "MI CAMPAÑA 2025".to_string()),
        })
    }
}
