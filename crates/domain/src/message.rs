//! Mass messages: drafted in the dashboard, delivered by an external workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campana_core::{MessageId, ProfileId, TerritoryId};

/// Message lifecycle: draft → scheduled → sent, strictly one way.
///
/// Actual delivery happens in an external workflow; this application only
/// records the progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Draft,
    Scheduled,
    Sent,
}

impl MessageStatus {
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (MessageStatus::Draft, MessageStatus::Scheduled)
                | (MessageStatus::Draft, MessageStatus::Sent)
                | (MessageStatus::Scheduled, MessageStatus::Sent)
        )
    }
}

/// A stored mass message. `territory_id == None` targets all territories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub subject: String,
    pub content: String,
    pub category: String,
    pub priority: String,
    pub status: MessageStatus,
    pub territory_id: Option<TerritoryId>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when drafting a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub subject: String,
    pub content: String,
    pub category: String,
    pub priority: String,
    pub territory_id: Option<TerritoryId>,
}

/// Partial update for a message. Status progression goes through the access
/// layer, which checks the one-way rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_is_one_way() {
        assert!(MessageStatus::Draft.can_transition_to(MessageStatus::Scheduled));
        assert!(MessageStatus::Scheduled.can_transition_to(MessageStatus::Sent));
        assert!(MessageStatus::Draft.can_transition_to(MessageStatus::Sent));

        assert!(!MessageStatus::Scheduled.can_transition_to(MessageStatus::Draft));
        assert!(!MessageStatus::Sent.can_transition_to(MessageStatus::Draft));
        assert!(!MessageStatus::Sent.can_transition_to(MessageStatus::Scheduled));
    }
}
