use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use campana_core::ProfileId;
use campana_domain::{NewProfile, ProfilePatch};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", patch(update_user).delete(delete_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_users(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewProfile>,
) -> axum::response::Response {
    match services.data.create_user(ctx.viewer(), body).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<ProfilePatch>,
) -> axum::response::Response {
    let id: ProfileId = match parse_id(&id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_user(ctx.viewer(), id, body).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProfileId = match parse_id(&id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_user(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
