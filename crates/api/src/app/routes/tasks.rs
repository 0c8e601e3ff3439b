use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use campana_core::TaskId;
use campana_domain::{NewTask, TaskPatch};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", patch(update_task).delete(delete_task))
}

pub async fn list_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_tasks(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewTask>,
) -> axum::response::Response {
    match services.data.create_task(ctx.viewer(), body).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<TaskPatch>,
) -> axum::response::Response {
    let id: TaskId = match parse_id(&id, "task") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_task(ctx.viewer(), id, body).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TaskId = match parse_id(&id, "task") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_task(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
