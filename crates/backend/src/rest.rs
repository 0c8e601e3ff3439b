//! HTTP implementation of the store and identity seams.
//!
//! Speaks the hosted service's REST dialect: `/rest/v1/<table>` with the
//! query grammar from [`crate::query`], and `/auth/v1/*` for sessions. The
//! service key authenticates this process; per-user row rules remain the
//! service's own responsibility.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use campana_core::ProfileId;

use crate::auth_api::{AccessSession, AuthApi, AuthApiError};
use crate::error::BackendError;
use crate::query::Query;
use crate::store::Backend;

/// Client for the hosted row store + identity service.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn read_rows(resp: reqwest::Response) -> Result<Vec<JsonValue>, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<Vec<JsonValue>>()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<JsonValue>, BackendError> {
        let resp = self
            .authed(self.client.get(self.table_url(table)))
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;
        Self::read_rows(resp).await
    }

    async fn insert(&self, table: &str, row: JsonValue) -> Result<JsonValue, BackendError> {
        let resp = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;
        let rows = Self::read_rows(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::decode("insert returned no representation"))
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: JsonValue,
    ) -> Result<Vec<JsonValue>, BackendError> {
        let resp = self
            .authed(self.client.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&query.to_params())
            .json(&patch)
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;
        Self::read_rows(resp).await
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<usize, BackendError> {
        let resp = self
            .authed(self.client.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;
        Ok(Self::read_rows(resp).await?.len())
    }
}

#[async_trait]
impl AuthApi for RestBackend {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessSession, AuthApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let payload: JsonValue = resp
            .json()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthApiError::Rejected(rejection_message(&payload)));
        }

        let access_token = payload["access_token"]
            .as_str()
            .ok_or_else(|| AuthApiError::Transport("missing access_token".to_string()))?
            .to_string();
        let user_id = payload["user"]["id"]
            .as_str()
            .and_then(|s| s.parse::<ProfileId>().ok())
            .ok_or_else(|| AuthApiError::Transport("missing user id".to_string()))?;

        Ok(AccessSession {
            access_token,
            user_id,
        })
    }

    async fn user_for_token(&self, token: &str) -> Result<ProfileId, AuthApiError> {
        let resp = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthApiError::InvalidSession);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(AuthApiError::Transport(format!("user lookup returned {status}")));
        }

        let payload: JsonValue = resp
            .json()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;
        payload["id"]
            .as_str()
            .and_then(|s| s.parse::<ProfileId>().ok())
            .ok_or(AuthApiError::InvalidSession)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthApiError> {
        self.client
            .post(self.auth_url("logout"))
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Pull the human-readable rejection out of the service's error body.
fn rejection_message(payload: &JsonValue) -> String {
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(s) = payload[key].as_str() {
            return s.to_string();
        }
    }
    "sign-in failed".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_error_description() {
        let payload = serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        });
        assert_eq!(rejection_message(&payload), "Invalid login credentials");
    }

    #[test]
    fn rejection_message_falls_back_to_a_generic() {
        assert_eq!(
            rejection_message(&serde_json::json!({})),
            "sign-in failed"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = RestBackend::new("https://example.test/", "key");
        assert_eq!(
            backend.table_url("alerts"),
            "https://example.test/rest/v1/alerts"
        );
        assert_eq!(backend.auth_url("user"), "https://example.test/auth/v1/user");
    }
}
