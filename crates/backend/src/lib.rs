//! `campana-backend` — the hosted-backend collaborator.
//!
//! The campaign's system of record is an external, row-filtered relational
//! service reached over HTTP. This crate owns that seam: the [`Backend`] and
//! [`AuthApi`] traits, the query grammar the service speaks, a
//! [`RestBackend`] implementation, and an in-memory twin for tests.
//!
//! No retries and no application-level timeout policy live here; failures are
//! reported once and the caller decides how to degrade.

pub mod auth_api;
pub mod error;
pub mod memory;
pub mod query;
pub mod rest;
pub mod store;

pub use auth_api::{AccessSession, AuthApi, AuthApiError};
pub use error::BackendError;
pub use memory::MemoryBackend;
pub use query::{Direction, Query};
pub use rest::RestBackend;
pub use store::Backend;
