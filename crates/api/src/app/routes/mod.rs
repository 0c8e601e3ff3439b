//! HTTP routes, one file per area.

use axum::Router;
use axum::routing::{get, post};

pub mod alerts;
pub mod assistant;
pub mod common;
pub mod events;
pub mod messages;
pub mod navigation;
pub mod session;
pub mod system;
pub mod tasks;
pub mod territories;
pub mod users;
pub mod voters;

/// Everything behind the auth middleware.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/territories", territories::router())
        .nest("/voters", voters::router())
        .nest("/alerts", alerts::router())
        .nest("/events", events::router())
        .nest("/messages", messages::router())
        .nest("/tasks", tasks::router())
        .nest("/users", users::router())
        .nest("/assistant", assistant::router())
        .route("/navigation", get(navigation::navigation))
        .route("/auth/session", get(session::current_session))
        .route("/auth/logout", post(session::logout))
}
