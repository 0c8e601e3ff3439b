//! HTTP client for the hosted text-generation endpoint.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::parse;

/// Gateway configuration. `api_key` left empty disables the gateway, which
/// makes every call degrade to its fallback.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl AiConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            temperature: 0.7,
            max_output_tokens: 512,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty() && !self.endpoint.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    /// Gateway configuration is absent; callers fall back immediately.
    #[error("generation disabled: no endpoint/key configured")]
    Disabled,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("generation endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Client for the generation endpoint.
#[derive(Debug, Clone)]
pub struct AiGateway {
    client: reqwest::Client,
    config: AiConfig,
}

impl AiGateway {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// One bounded generation call. No retries; the first answer (or failure)
    /// is the answer.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        if !self.config.is_enabled() {
            return Err(AiError::Disabled);
        }

        let body = GenerateRequest {
            prompt,
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        let resp = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", &self.config.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload: JsonValue = resp
            .json()
            .await
            .map_err(|e| AiError::Malformed(e.to_string()))?;
        payload["candidateText"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AiError::Malformed("missing candidateText".to_string()))
    }

    /// Generate text, degrading any failure to `fallback`.
    pub async fn generate_text_or(&self, prompt: &str, fallback: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "generation failed; using fallback copy");
                fallback.to_string()
            }
        }
    }

    /// Generate and parse a JSON answer (code fences tolerated), degrading
    /// any failure to `fallback`.
    pub async fn generate_json_or<T: DeserializeOwned>(&self, prompt: &str, fallback: T) -> T {
        match self.generate(prompt).await {
            Ok(text) => match parse::json_from_text(&text) {
                Some(value) => value,
                None => {
                    tracing::warn!("generation returned unparsable JSON; using fallback");
                    fallback
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "generation failed; using fallback");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_disables_the_gateway() {
        let config = AiConfig::new("https://ai.example.test/generate", "");
        assert!(!config.is_enabled());
    }

    #[tokio::test]
    async fn disabled_gateway_returns_the_fallback() {
        let gateway = AiGateway::new(AiConfig::new("", ""));
        let text = gateway
            .generate_text_or("hola", "Servicio no disponible.")
            .await;
        assert_eq!(text, "Servicio no disponible.");
    }

    #[test]
    fn request_body_uses_the_endpoint_field_names() {
        let body = GenerateRequest {
            prompt: "hola",
            temperature: 0.7,
            max_output_tokens: 256,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("maxOutputTokens").is_some());
        assert!(json.get("max_output_tokens").is_none());
    }
}
