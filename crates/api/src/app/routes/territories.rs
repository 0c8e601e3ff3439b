use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use campana_core::TerritoryId;
use campana_domain::{NewTerritory, TerritoryPatch};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_territories).post(create_territory))
        .route("/:id", patch(update_territory).delete(delete_territory))
}

pub async fn list_territories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_territories(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_territory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewTerritory>,
) -> axum::response::Response {
    match services.data.create_territory(ctx.viewer(), body).await {
        Ok(territory) => (StatusCode::CREATED, Json(territory)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_territory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<TerritoryPatch>,
) -> axum::response::Response {
    let id: TerritoryId = match parse_id(&id, "territory") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_territory(ctx.viewer(), id, body).await {
        Ok(territory) => (StatusCode::OK, Json(territory)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_territory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TerritoryId = match parse_id(&id, "territory") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_territory(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
