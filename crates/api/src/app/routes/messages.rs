use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use campana_core::MessageId;
use campana_domain::{MessagePatch, NewMessage};

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/:id", patch(update_message).delete(delete_message))
        .route("/:id/schedule", post(schedule_message))
        .route("/:id/mark-sent", post(mark_message_sent))
}

pub async fn list_messages(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_messages(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewMessage>,
) -> axum::response::Response {
    match services.data.create_message(ctx.viewer(), body).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<MessagePatch>,
) -> axum::response::Response {
    let id: MessageId = match parse_id(&id, "message") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_message(ctx.viewer(), id, body).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn schedule_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ScheduleMessageRequest>,
) -> axum::response::Response {
    let id: MessageId = match parse_id(&id, "message") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services
        .data
        .schedule_message(ctx.viewer(), id, body.scheduled_for)
        .await
    {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

/// Called back by the external delivery workflow once it has sent the batch.
pub async fn mark_message_sent(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MessageId = match parse_id(&id, "message") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.mark_message_sent(ctx.viewer(), id).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MessageId = match parse_id(&id, "message") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_message(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
