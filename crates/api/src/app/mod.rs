//! HTTP application wiring (router + middleware layering).
//!
//! Structure:
//! - `services.rs`: backend/session/data/AI wiring shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `/health` and `/auth/login` stay public; everything else requires a
/// resolvable bearer session.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        Arc::clone(&services),
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::session::login))
        .merge(protected)
        .layer(Extension(services))
}
