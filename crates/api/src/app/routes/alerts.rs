use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use campana_core::AlertId;
use campana_domain::{AlertPatch, NewAlert};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_alerts).post(create_alert))
        .route("/:id", patch(update_alert).delete(delete_alert))
        .route("/:id/resolve", post(resolve_alert))
        .route("/:id/dismiss", post(dismiss_alert))
}

pub async fn list_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_alerts(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewAlert>,
) -> axum::response::Response {
    match services.data.create_alert(ctx.viewer(), body).await {
        Ok(alert) => (StatusCode::CREATED, Json(alert)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<AlertPatch>,
) -> axum::response::Response {
    let id: AlertId = match parse_id(&id, "alert") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_alert(ctx.viewer(), id, body).await {
        Ok(alert) => (StatusCode::OK, Json(alert)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn resolve_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: AlertId = match parse_id(&id, "alert") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.resolve_alert(ctx.viewer(), id).await {
        Ok(alert) => (StatusCode::OK, Json(alert)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn dismiss_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: AlertId = match parse_id(&id, "alert") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.dismiss_alert(ctx.viewer(), id).await {
        Ok(alert) => (StatusCode::OK, Json(alert)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: AlertId = match parse_id(&id, "alert") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_alert(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
