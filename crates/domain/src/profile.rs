//! User profiles: identity rows with a role and a creation back-reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_auth::Role;
use campana_core::ProfileId;

/// A stored user profile.
///
/// `created_by` records who minted this account. The creation ladder
/// (desarrollador → master → candidato → lider → votante) is a convention
/// enforced where accounts are created, not a structural invariant of the
/// stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub display_name: String,
    pub role: Role,
    pub created_by: Option<ProfileId>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a profile. Identity, `created_by`, and the
/// timestamp are stamped by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub display_name: String,
    pub role: Role,
}

/// Partial update for a profile. Roles are not editable through this path;
/// re-assigning a role means re-creating the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
