//! Data carried across ports.

use chrono::{DateTime, Utc};
use herosheet_domain::{ActorId, ChatMessageId, SkillCheckOutcome};
use serde::{Deserialize, Serialize};

/// A message in the shared chat feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub speaker_id: ActorId,
    pub speaker_name: String,
    /// Rendered HTML card
    pub content: String,
    /// Structured roll result when the message is a roll card
    pub roll: Option<SkillCheckOutcome>,
    pub created_at: DateTime<Utc>,
}
