use crate::flow::ConnectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message received from a platform, as handed over by the ingestion
/// collaborator (webhook receiver). Read-only input to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub text: String,
    /// Platform-scoped id of the sender (e.g. an Instagram user id).
    pub sender_platform_id: String,
    /// The connection (linked account) the message arrived on.
    pub connection_id: ConnectionId,
    pub timestamp: DateTime<Utc>,
}

/// The CRM contact associated with an inbound message. All profile fields are
/// optional; unresolved message placeholders stay verbatim when a field is
/// missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Contact {
    /// Case-insensitive tag membership, the comparison used by condition
    /// predicates.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}
