//! Registered voters: the campaign's contact roll, scoped by territory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_core::{ProfileId, TerritoryId, VoterId};

/// How firmly a voter has committed to the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    Committed,
    Likely,
    Undecided,
    Unlikely,
}

/// A stored voter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub territory_id: TerritoryId,
    pub registered_by: ProfileId,
    pub commitment_level: CommitmentLevel,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when registering a voter. `registered_by` is stamped from
/// the viewer by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVoter {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub territory_id: TerritoryId,
    pub commitment_level: CommitmentLevel,
}

/// Partial update for a voter record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<TerritoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment_level: Option<CommitmentLevel>,
}
