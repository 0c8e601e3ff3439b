//! Alerts: incident reports tied to a territory and an affected user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_core::{AlertId, ProfileId, TerritoryId};

/// Alert lifecycle. `Resolved` and `Dismissed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AlertStatus::Resolved | AlertStatus::Dismissed)
    }

    /// Whether this status may move to `next`. Alerts are created active and
    /// settle exactly once.
    pub fn can_transition_to(&self, next: AlertStatus) -> bool {
        match self {
            AlertStatus::Active => matches!(next, AlertStatus::Resolved | AlertStatus::Dismissed),
            AlertStatus::Resolved | AlertStatus::Dismissed => false,
        }
    }
}

/// Urgency of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A stored alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AlertStatus,
    pub priority: AlertPriority,
    pub territory_id: TerritoryId,
    pub affected_user_id: ProfileId,
    pub created_by: ProfileId,
    pub resolved_by: Option<ProfileId>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when raising an alert. Alerts always start active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlert {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: AlertPriority,
    pub territory_id: TerritoryId,
    pub affected_user_id: ProfileId,
}

/// Partial update for an alert. Status changes go through the access layer,
/// which checks the transition and stamps the resolution fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<AlertPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
}
