use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A side-effecting step the engine decided on. The engine never performs the
/// effect itself; the ordered instruction list is handed to the external
/// dispatcher, which owns delivery, tag persistence, API calls, broadcast
/// queues and delay scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Send a text reply to the contact. `scheduled_at` is set when the
    /// message node carried a delay; the dispatcher must hold delivery until
    /// then (the engine never sleeps).
    SendMessage {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        buttons: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scheduled_at: Option<DateTime<Utc>>,
    },
    /// Apply a tag to the contact.
    AddTag { tag: String },
    /// Invoke an external HTTP endpoint.
    CallExternalApi { endpoint: String },
    /// Start another flow as a follow-up sequence for this contact.
    StartSequence { flow_id: String },
    /// Enqueue a broadcast to every contact carrying any of the target tags.
    EnqueueBroadcast { content: String, tags: Vec<String> },
}

impl Instruction {
    /// Convenience constructor for an immediate, button-less text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Instruction::SendMessage {
            content: content.into(),
            buttons: Vec::new(),
            scheduled_at: None,
        }
    }
}
