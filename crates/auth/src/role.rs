//! Campaign role model.
//!
//! Roles form a closed enum so that every role-keyed decision in this crate
//! can be an exhaustive `match`. A role string the enum does not know is a
//! parse error, never a silent default.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The campaign hierarchy, highest rank first.
///
/// Stored profile rows carry the Spanish wire names (`desarrollador`,
/// `master`, `candidato`, `lider`, `votante`, `visitante`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Desarrollador,
    Master,
    Candidato,
    Lider,
    Votante,
    Visitante,
}

impl Role {
    /// Every role, in rank order. Useful for table-driven tests.
    pub const ALL: [Role; 6] = [
        Role::Desarrollador,
        Role::Master,
        Role::Candidato,
        Role::Lider,
        Role::Votante,
        Role::Visitante,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Desarrollador => "desarrollador",
            Role::Master => "master",
            Role::Candidato => "candidato",
            Role::Lider => "lider",
            Role::Votante => "votante",
            Role::Visitante => "visitante",
        }
    }

    /// The single role this role is allowed to create, one step down the
    /// hierarchy. Nobody creates `desarrollador`; the bottom ranks create
    /// nothing.
    pub fn creates(&self) -> Option<Role> {
        match self {
            Role::Desarrollador => Some(Role::Master),
            Role::Master => Some(Role::Candidato),
            Role::Candidato => Some(Role::Lider),
            Role::Lider => Some(Role::Votante),
            Role::Votante => None,
            Role::Visitante => None,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string outside the closed enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desarrollador" => Ok(Role::Desarrollador),
            "master" => Ok(Role::Master),
            "candidato" => Ok(Role::Candidato),
            "lider" => Ok(Role::Lider),
            "votante" => Ok(Role::Votante),
            "visitante" => Ok(Role::Visitante),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_an_error() {
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("MASTER".parse::<Role>().is_err());
    }

    #[test]
    fn creation_ladder_descends_one_step() {
        assert_eq!(Role::Desarrollador.creates(), Some(Role::Master));
        assert_eq!(Role::Master.creates(), Some(Role::Candidato));
        assert_eq!(Role::Candidato.creates(), Some(Role::Lider));
        assert_eq!(Role::Lider.creates(), Some(Role::Votante));
        assert_eq!(Role::Votante.creates(), None);
        assert_eq!(Role::Visitante.creates(), None);
    }

    #[test]
    fn nobody_creates_desarrollador_or_themselves() {
        for role in Role::ALL {
            assert_ne!(role.creates(), Some(Role::Desarrollador));
            assert_ne!(role.creates(), Some(role));
        }
    }
}
