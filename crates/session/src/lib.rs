//! `campana-session` — the session/identity provider.
//!
//! Owns the `loading → anonymous | authenticated` lifecycle over the hosted
//! backend's auth API plus profile resolution. The one invariant everything
//! downstream leans on: **nobody ever observes an authenticated session whose
//! role is unresolved or invalid**. A profile that cannot be read or parsed
//! forces a sign-out instead.

pub mod manager;
pub mod state;

pub use manager::{SessionError, SessionManager};
pub use state::{CurrentUser, SessionState};
