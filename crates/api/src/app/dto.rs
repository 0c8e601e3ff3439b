//! Request DTOs that don't map 1:1 onto a domain type.
//!
//! Entity creation/patch bodies reuse the `New*`/`*Patch` types from
//! `campana-domain` directly.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use campana_session::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleMessageRequest {
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessageRequest {
    pub topic: String,
    pub audience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    pub summary: String,
}

pub fn current_user_to_json(user: &CurrentUser) -> serde_json::Value {
    json!({
        "id": user.viewer.id,
        "display_name": user.display_name,
        "role": user.viewer.role,
    })
}
