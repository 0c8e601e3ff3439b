//! Capability flags derived from a viewer's role.
//!
//! Like the scope filters, capabilities are a pure lookup over the closed
//! role enum. A missing viewer gets [`Capabilities::none`].

use serde::Serialize;

use crate::Viewer;
use crate::role::Role;

/// What a viewer is allowed to do, as booleans the view layer and the access
/// layer can both consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_create_territory: bool,
    pub can_manage_users: bool,
    pub can_view_all_data: bool,
    pub can_create_desarrollador: bool,
    pub can_create_master: bool,
    pub can_create_candidato: bool,
    pub can_create_lider: bool,
    pub can_create_votante: bool,
}

impl Capabilities {
    /// Everything false. The resolution for unauthenticated viewers, and the
    /// baseline each role's grants are added onto.
    pub const fn none() -> Self {
        Self {
            can_create_territory: false,
            can_manage_users: false,
            can_view_all_data: false,
            can_create_desarrollador: false,
            can_create_master: false,
            can_create_candidato: false,
            can_create_lider: false,
            can_create_votante: false,
        }
    }

    /// Whether the holder may create a user with `target` role.
    pub fn can_create_role(&self, target: Role) -> bool {
        match target {
            Role::Desarrollador => self.can_create_desarrollador,
            Role::Master => self.can_create_master,
            Role::Candidato => self.can_create_candidato,
            Role::Lider => self.can_create_lider,
            Role::Votante => self.can_create_votante,
            Role::Visitante => false,
        }
    }
}

/// Resolve capability flags for `viewer`.
///
/// Candidato currently carries the same territory/user-management rights as
/// master. Whether candidato should instead be strictly subordinate is an
/// unresolved product question; until it is settled the parity stands.
pub fn capabilities_for(viewer: Option<&Viewer>) -> Capabilities {
    let Some(viewer) = viewer else {
        return Capabilities::none();
    };

    let base = Capabilities::none();
    match viewer.role {
        Role::Desarrollador => Capabilities {
            can_create_master: true,
            ..base
        },
        Role::Master => Capabilities {
            can_create_territory: true,
            can_manage_users: true,
            can_view_all_data: true,
            can_create_candidato: true,
            ..base
        },
        Role::Candidato => Capabilities {
            can_create_territory: true,
            can_manage_users: true,
            can_create_lider: true,
            ..base
        },
        Role::Lider => Capabilities {
            can_create_votante: true,
            ..base
        },
        Role::Votante => base,
        Role::Visitante => base,
    }
}
