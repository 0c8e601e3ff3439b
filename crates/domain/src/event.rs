//! Campaign events: rallies, meetings, canvassing sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_core::{EventId, ProfileId, TerritoryId};

/// Event lifecycle. Enum membership is the only rule checked; events may move
/// freely between statuses (cancellations get undone, plans get revived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

/// A stored campaign event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: EventStatus,
    pub territory_id: TerritoryId,
    pub responsible_user_id: ProfileId,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when scheduling an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub territory_id: TerritoryId,
    pub responsible_user_id: ProfileId,
}

/// Partial update for an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<ProfileId>,
}
