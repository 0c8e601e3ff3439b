//! `campana-access` — the entity access layer.
//!
//! One [`DataAccess`] instance per process wraps the backend with the pieces
//! every entity operation shares: the viewer's scope filter on reads *and*
//! mutations, capability checks before writes, `created_by`-style stamping,
//! soft-fail reads, and list-cache invalidation after every mutation.
//!
//! The hosted backend's own row rules remain the final authority; the checks
//! here keep this service honest rather than replacing them.

pub mod alerts;
pub mod cache;
pub mod error;
pub mod events;
pub mod messages;
pub mod store;
pub mod tasks;
pub mod territories;
pub mod users;
pub mod voters;

pub use cache::ListCache;
pub use error::AccessError;
pub use store::DataAccess;
