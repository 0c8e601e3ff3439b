//! Server-side proxy to the generative-AI gateway.
//!
//! Every handler answers 200: a gateway failure degrades to static Spanish
//! copy rather than an error the shell has to handle.

use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};

use campana_ai::{SentimentVerdict, prompt};

use crate::app::dto;
use crate::app::services::AppServices;
use crate::context::SessionContext;

const FALLBACK_COPY: &str =
    "El asistente no está disponible en este momento. Intenta de nuevo más tarde.";

pub fn router() -> Router {
    Router::new()
        .route("/message", post(draft_message))
        .route("/sentiment", post(analyze_sentiment))
        .route("/insights", post(strategic_insights))
}

pub async fn draft_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<dto::AssistantMessageRequest>,
) -> axum::response::Response {
    let prompt = prompt::campaign_message(
        &ctx.prompt_context(&services.campaign_name),
        &body.topic,
        body.audience.as_deref().unwrap_or("la comunidad"),
    );
    let text = services.ai.generate_text_or(&prompt, FALLBACK_COPY).await;
    (StatusCode::OK, Json(serde_json::json!({ "text": text }))).into_response()
}

pub async fn analyze_sentiment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<dto::SentimentRequest>,
) -> axum::response::Response {
    let prompt =
        prompt::sentiment_analysis(&ctx.prompt_context(&services.campaign_name), &body.feedback);
    let verdict: SentimentVerdict = services
        .ai
        .generate_json_or(&prompt, SentimentVerdict::default())
        .await;
    (StatusCode::OK, Json(verdict)).into_response()
}

pub async fn strategic_insights(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<dto::InsightsRequest>,
) -> axum::response::Response {
    let prompt =
        prompt::strategic_insights(&ctx.prompt_context(&services.campaign_name), &body.summary);
    let text = services.ai.generate_text_or(&prompt, FALLBACK_COPY).await;
    (StatusCode::OK, Json(serde_json::json!({ "text": text }))).into_response()
}
