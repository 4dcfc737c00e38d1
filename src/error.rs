use crate::flow::{BranchHandle, NodeId};
use thiserror::Error;

/// Structural problems with a flow graph that make it unsafe to activate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Flow has no trigger node and cannot be activated")]
    MissingTrigger,

    #[error("Flow has more than one entry point; found extra trigger node '{0}'")]
    MultipleTriggers(NodeId),

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(NodeId),

    #[error("Flow has more than one platform selector; found extra node '{0}'")]
    MultiplePlatformSelectors(NodeId),

    #[error(
        "Platform selector '{selector_id}' must connect directly to the trigger node, not to '{target_id}'"
    )]
    SelectorNotBeforeTrigger {
        selector_id: NodeId,
        target_id: NodeId,
    },

    #[error("Edge '{edge_id}' references node '{node_id}', which does not exist in the flow")]
    UnknownNode { edge_id: String, node_id: NodeId },

    #[error("Condition node '{node_id}' is missing its '{branch}' branch")]
    MissingBranch {
        node_id: NodeId,
        branch: BranchHandle,
    },

    #[error("Condition node '{node_id}' has an outgoing edge without a true/false handle")]
    UnlabeledConditionEdge { node_id: NodeId },

    #[error("Node '{node_id}' has {count} outgoing edges, but its kind allows at most one")]
    TooManyOutgoingEdges { node_id: NodeId, count: usize },

    #[error("Flow contains a cycle reachable from the entry, through node '{node_id}'")]
    CycleDetected { node_id: NodeId },
}

/// Per-node payload problems, reported with the offending node id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Message node '{0}' has empty content")]
    EmptyMessageContent(NodeId),

    #[error("Message node '{node_id}' has {count} buttons; at most {max} are allowed")]
    TooManyButtons {
        node_id: NodeId,
        count: usize,
        max: usize,
    },

    #[error("Message node '{node_id}' delays by {delay} seconds; at most {max} are allowed")]
    DelayTooLong {
        node_id: NodeId,
        delay: u64,
        max: u64,
    },

    #[error("Condition node '{0}' has an empty predicate")]
    EmptyPredicate(NodeId),

    #[error("Condition node '{node_id}' has an invalid predicate: {message}")]
    InvalidPredicate { node_id: NodeId, message: String },

    #[error("Action node '{0}' has empty details")]
    EmptyActionDetails(NodeId),

    #[error("Broadcast node '{0}' has empty content")]
    EmptyBroadcastContent(NodeId),

    #[error("Platform selector '{0}' has no platforms selected; the flow could never run")]
    NoPlatformsSelected(NodeId),
}

/// Errors returned by `validate`. Both variants are user-facing and block
/// flow activation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Runtime errors raised while interpreting a flow against one inbound
/// message. These are logged and discarded by the caller; instructions
/// accumulated before the failure are never delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Node '{0}' was visited twice during one execution; the flow contains a cycle")]
    Cycle(NodeId),

    #[error("Condition node '{node_id}' has no edge for its '{branch}' branch")]
    MissingBranch {
        node_id: NodeId,
        branch: BranchHandle,
    },

    #[error("Condition node '{node_id}' has an unreadable predicate: {message}")]
    BadPredicate { node_id: NodeId, message: String },

    #[error("Execution visited more than {budget} nodes and was aborted")]
    BudgetExceeded { budget: usize },

    #[error("Message node '{node_id}' has a delay of {delay} seconds, which overflows scheduling")]
    DelayOutOfRange { node_id: NodeId, delay: u64 },

    #[error("Entry node '{0}' does not exist in the flow")]
    UnknownEntry(NodeId),

    /// The document failed a basic structural invariant at runtime. Only
    /// possible for documents that bypassed validation.
    #[error("Flow document is malformed: {0}")]
    Malformed(#[from] StructureError),
}
