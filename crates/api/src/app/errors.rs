//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use campana_access::AccessError;
use campana_session::SessionError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn access_error_to_response(err: AccessError) -> axum::response::Response {
    match err {
        AccessError::Forbidden(action) => {
            json_error(StatusCode::FORBIDDEN, "forbidden", format!("forbidden: {action}"))
        }
        AccessError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        AccessError::Invariant(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        AccessError::Codec(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "codec_error", msg)
        }
        AccessError::Backend(e) => {
            json_error(StatusCode::BAD_GATEWAY, "backend_error", e.to_string())
        }
    }
}

/// Login/session failures carry the Spanish user-facing copy in `message`.
pub fn session_error_to_response(err: &SessionError) -> axum::response::Response {
    json_error(StatusCode::UNAUTHORIZED, "auth_failed", err.user_message())
}
