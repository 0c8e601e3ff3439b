use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use campana_core::EventId;
use campana_domain::{EventPatch, NewEvent};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", patch(update_event).delete(delete_event))
}

pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_events(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewEvent>,
) -> axum::response::Response {
    match services.data.create_event(ctx.viewer(), body).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<EventPatch>,
) -> axum::response::Response {
    let id: EventId = match parse_id(&id, "event") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_event(ctx.viewer(), id, body).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match parse_id(&id, "event") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_event(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
