//! The resolved principal a permission decision is made for.

use campana_core::ProfileId;

use crate::Role;

/// An authenticated user as the permission layer sees it: identity plus role,
/// nothing else.
///
/// Construction is decoupled from storage and transport; the session layer
/// builds a `Viewer` only after the profile (and therefore the role) has been
/// resolved, so a `Viewer` never carries an unknown role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: ProfileId,
    pub role: Role,
}

impl Viewer {
    pub fn new(id: ProfileId, role: Role) -> Self {
        Self { id, role }
    }
}
