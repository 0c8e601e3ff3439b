use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use campana_auth::capabilities_for;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

/// POST /auth/login (public; the only route that mints a session).
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.session.login(&body.email, &body.password).await {
        Ok(user) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "access_token": user.session.access_token,
                "user": dto::current_user_to_json(&user),
            })),
        )
            .into_response(),
        Err(err) => errors::session_error_to_response(&err),
    }
}

/// GET /auth/session
pub async fn current_session(
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "user": dto::current_user_to_json(ctx.user()),
            "capabilities": capabilities_for(Some(ctx.viewer())),
        })),
    )
        .into_response()
}

/// POST /auth/logout
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    services
        .session
        .revoke(&ctx.user().session.access_token)
        .await;
    (StatusCode::OK, Json(serde_json::json!({ "signed_out": true }))).into_response()
}
