//! Prelude module for convenient imports
//!
//! Re-exports the types needed for the common path: parse a document,
//! validate it, route an inbound message, inspect the instructions.

// Document model and validation
pub use crate::flow::{
    ActionKind, ActionNode, BranchHandle, BroadcastNode, ConditionNode, ConnectionId, Edge,
    FlowDocument, MessageNode, Node, NodeId, NodeKind, PlatformSelectorNode, TriggerNode,
    ValidatedFlow, validate,
};

// Runtime inputs and outputs
pub use crate::data::{Contact, InboundMessage};
pub use crate::instruction::Instruction;

// Interpretation
pub use crate::interpreter::{ExecutionContext, Predicate, execute, execute_from};

// Keyword rules
pub use crate::keyword::{KeywordRule, MatchType, ReplyType, RuleStatus};

// Orchestration
pub use crate::router::{ActiveFlow, Router, RouterConfig};

// Error types
pub use crate::error::{ExecutionError, PayloadError, StructureError, ValidationError};
