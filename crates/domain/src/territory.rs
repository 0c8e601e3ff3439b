//! Territories: the geographic/administrative units records are scoped by.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_core::{ProfileId, TerritoryId};

/// Administrative level of a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerritoryKind {
    Department,
    Municipality,
    Corregimiento,
    Vereda,
    Neighborhood,
    Sector,
}

/// A stored territory.
///
/// No cross-territory name uniqueness is checked here; the backend owns the
/// rows and any such constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TerritoryKind,
    pub responsible_user_id: ProfileId,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerritory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TerritoryKind,
    pub responsible_user_id: ProfileId,
}

/// Partial update for a territory. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TerritoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<ProfileId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_are_lowercase() {
        let json = serde_json::to_string(&TerritoryKind::Corregimiento).unwrap();
        assert_eq!(json, "\"corregimiento\"");
    }

    #[test]
    fn empty_patch_serializes_to_an_empty_object() {
        let json = serde_json::to_string(&TerritoryPatch::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
