use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within one flow document. Unique per document, not
/// globally.
pub type NodeId = String;

/// Identifier of a platform connection (an Instagram/Facebook/WhatsApp account
/// linked by the user).
pub type ConnectionId = String;

/// The persisted node/edge document of one automation flow, exactly as the
/// visual editor stores it. The engine treats it as read-only input; it is
/// normalized (never mutated in place) by [`validate`](crate::flow::validate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    pub nodes: Vec<Node>,
    /// Insertion order is meaningful: it is the deterministic tie-break for
    /// execution and normalization.
    pub edges: Vec<Edge>,
}

impl FlowDocument {
    /// Parses a flow document from the JSON the editor persists. Editor-only
    /// fields (canvas positions, dimensions) are ignored; an unknown node
    /// `type` is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A single node of the flow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Closed set of node kinds and their payloads. The wire format is adjacently
/// tagged (`"type"` / `"data"`), matching the editor's document; any payload
/// shape outside this set is a deserialization error rather than silently
/// accepted data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeKind {
    Trigger(TriggerNode),
    Message(MessageNode),
    Condition(ConditionNode),
    Action(ActionNode),
    Broadcast(BroadcastNode),
    PlatformSelector(PlatformSelectorNode),
}

impl NodeKind {
    /// Short name used in log events and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Trigger(_) => "trigger",
            NodeKind::Message(_) => "message",
            NodeKind::Condition(_) => "condition",
            NodeKind::Action(_) => "action",
            NodeKind::Broadcast(_) => "broadcast",
            NodeKind::PlatformSelector(_) => "platformSelector",
        }
    }
}

/// Entry node of a flow. An empty keyword set makes the trigger a catch-all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerNode {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Sends a text reply, optionally with quick-reply buttons and a delivery
/// delay. `content` may embed `{name}`, `{phone}`, `{email}` placeholders
/// (Portuguese aliases accepted), resolved from the contact at execution time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageNode {
    pub content: String,
    #[serde(default)]
    pub buttons: Vec<String>,
    /// Delay before delivery, in seconds. `None` means send immediately.
    #[serde(default)]
    pub delay: Option<u64>,
}

/// Two-way branch over contact/message state. The predicate grammar is
/// documented in [`crate::interpreter::Predicate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionNode {
    pub condition: String,
}

/// Side-effecting step: tag the contact, call an external API, or start
/// another flow as a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionNode {
    pub action: ActionKind,
    /// Tag name, endpoint URL, or target flow id, depending on `action`.
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddTag,
    CallApi,
    StartSequence,
}

/// Enqueues a broadcast to every contact carrying any of the target tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BroadcastNode {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Gates the whole flow to a set of platform connections. Placed upstream of
/// the trigger; a message arriving on an unselected connection halts execution
/// before any instruction is emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSelectorNode {
    #[serde(default, rename = "selectedPlatforms")]
    pub selected_platforms: Vec<ConnectionId>,
}

/// A directed connection between two nodes. `source_handle` is only present on
/// edges leaving a condition node, where it selects the branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, rename = "sourceHandle", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<BranchHandle>,
}

/// Branch label on a condition node's outgoing edges. The editor writes
/// `"true"`/`"false"`; `"yes"`/`"no"` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchHandle {
    #[serde(alias = "yes")]
    True,
    #[serde(alias = "no")]
    False,
}

impl BranchHandle {
    pub fn from_bool(value: bool) -> Self {
        if value {
            BranchHandle::True
        } else {
            BranchHandle::False
        }
    }
}

impl fmt::Display for BranchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchHandle::True => write!(f, "true"),
            BranchHandle::False => write!(f, "false"),
        }
    }
}
