use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use campana_auth::capabilities_for;

use crate::compose;
use crate::context::SessionContext;

/// GET /navigation: everything the shell needs to render for this role.
pub async fn navigation(Extension(ctx): Extension<SessionContext>) -> axum::response::Response {
    let role = ctx.viewer().role;
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "tabs": compose::nav_tabs(role),
            "quick_actions": compose::quick_actions(role),
            "capabilities": capabilities_for(Some(ctx.viewer())),
        })),
    )
        .into_response()
}
