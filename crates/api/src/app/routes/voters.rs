use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use campana_core::VoterId;
use campana_domain::{NewVoter, VoterPatch};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_voters).post(register_voter))
        .route("/:id", patch(update_voter).delete(delete_voter))
}

pub async fn list_voters(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.data.list_voters(ctx.viewer()).await;
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn register_voter(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<NewVoter>,
) -> axum::response::Response {
    match services.data.register_voter(ctx.viewer(), body).await {
        Ok(voter) => (StatusCode::CREATED, Json(voter)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn update_voter(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<VoterPatch>,
) -> axum::response::Response {
    let id: VoterId = match parse_id(&id, "voter") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.update_voter(ctx.viewer(), id, body).await {
        Ok(voter) => (StatusCode::OK, Json(voter)).into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}

pub async fn delete_voter(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: VoterId = match parse_id(&id, "voter") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_voter(ctx.viewer(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::access_error_to_response(err),
    }
}
