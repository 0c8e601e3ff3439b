//! `campana-auth` — pure authorization boundary for the campaign.
//!
//! This crate is intentionally decoupled from HTTP and storage. Everything
//! here is a deterministic function of (role, viewer id): data-scope filters,
//! capability flags, and the login-failure taxonomy. No IO, no panics.

pub mod capabilities;
pub mod login;
pub mod role;
pub mod scope;
pub mod viewer;

pub use capabilities::{Capabilities, capabilities_for};
pub use login::LoginError;
pub use role::{Role, UnknownRole};
pub use scope::{ScopeFilter, ScopeKind, scope_filter};
pub use viewer::Viewer;
