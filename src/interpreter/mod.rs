//! The flow interpreter: walks a validated graph from its entry and turns the
//! path into an ordered list of [`Instruction`]s.
//!
//! Interpretation is pure and bounded: no I/O, no blocking, no shared state.
//! Any runtime failure discards every instruction accumulated so far
//! (all-or-nothing emission) and is reported to the caller for logging.

pub mod predicate;
pub mod template;

pub use predicate::{Comparison, Predicate, Subject};

use crate::data::{Contact, InboundMessage};
use crate::error::ExecutionError;
use crate::flow::graph::FlowGraph;
use crate::flow::{ActionKind, BranchHandle, FlowDocument, NodeId, NodeKind, ValidatedFlow};
use crate::instruction::Instruction;
use ahash::AHashSet;
use chrono::{DateTime, Duration, Utc};

/// Default cap on nodes visited per execution. Validation guarantees the graph
/// is acyclic, so this only bounds pathologically long (but legal) chains.
pub const DEFAULT_NODE_BUDGET: usize = 200;

/// Per-message transient state threaded through one interpretation run.
/// Never shared across invocations, which is what makes parallel message
/// processing safe without locks.
pub struct ExecutionContext<'a> {
    pub message: &'a InboundMessage,
    pub contact: &'a Contact,
    budget: usize,
    visited: AHashSet<usize>,
    instructions: Vec<Instruction>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(message: &'a InboundMessage, contact: &'a Contact) -> Self {
        Self {
            message,
            contact,
            budget: DEFAULT_NODE_BUDGET,
            visited: AHashSet::new(),
            instructions: Vec::new(),
        }
    }

    /// Overrides the node-visit budget for this execution.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }
}

/// Executes a validated flow against one inbound message.
///
/// Starts at the flow's entry (the platform selector when present, otherwise
/// the trigger) and walks until a node has no outgoing edge. A message that
/// arrived on a connection the selector does not include halts immediately
/// with zero instructions; that is a normal outcome, not an error.
pub fn execute(
    flow: &ValidatedFlow,
    ctx: ExecutionContext<'_>,
) -> Result<Vec<Instruction>, ExecutionError> {
    execute_from(flow.document(), flow.entry_id(), ctx)
}

/// Executes an arbitrary document from an explicit entry node.
///
/// Assumes nothing about prior validation: a document that slipped through
/// the activation gate fails with an [`ExecutionError`] rather than looping
/// or panicking.
pub fn execute_from(
    doc: &FlowDocument,
    entry: &NodeId,
    mut ctx: ExecutionContext<'_>,
) -> Result<Vec<Instruction>, ExecutionError> {
    let graph = FlowGraph::build(doc)?;
    let start = graph
        .index_of(entry)
        .ok_or_else(|| ExecutionError::UnknownEntry(entry.clone()))?;

    walk(&graph, start, &mut ctx)?;
    tracing::debug!(
        entry = %entry,
        instructions = ctx.instructions.len(),
        "flow execution finished"
    );
    Ok(ctx.instructions)
}

/// Computes a delivery time `secs` seconds after `ts`, or `None` when the
/// delay does not fit signed timestamp arithmetic. Validation caps delays far
/// below this, so `None` only happens for documents that bypassed it.
fn schedule_after(ts: DateTime<Utc>, secs: u64) -> Option<DateTime<Utc>> {
    let delta = Duration::try_seconds(i64::try_from(secs).ok()?)?;
    ts.checked_add_signed(delta)
}

fn walk(
    graph: &FlowGraph<'_>,
    start: usize,
    ctx: &mut ExecutionContext<'_>,
) -> Result<(), ExecutionError> {
    let mut current = Some(start);

    while let Some(idx) = current {
        let node = graph.node(idx);
        if !ctx.visited.insert(idx) {
            return Err(ExecutionError::Cycle(node.id.clone()));
        }
        if ctx.visited.len() > ctx.budget {
            return Err(ExecutionError::BudgetExceeded { budget: ctx.budget });
        }

        current = match &node.kind {
            NodeKind::Trigger(_) => graph.successor(idx),

            NodeKind::PlatformSelector(sel) => {
                if !sel.selected_platforms.contains(&ctx.message.connection_id) {
                    tracing::debug!(
                        node = %node.id,
                        connection = %ctx.message.connection_id,
                        "message arrived on an unselected platform; halting"
                    );
                    ctx.instructions.clear();
                    return Ok(());
                }
                graph.successor(idx)
            }

            NodeKind::Message(msg) => {
                let content = template::render(&msg.content, ctx.contact);
                let scheduled_at = match msg.delay {
                    Some(secs) => {
                        Some(schedule_after(ctx.message.timestamp, secs).ok_or_else(|| {
                            ExecutionError::DelayOutOfRange {
                                node_id: node.id.clone(),
                                delay: secs,
                            }
                        })?)
                    }
                    None => None,
                };
                ctx.instructions.push(Instruction::SendMessage {
                    content,
                    buttons: msg.buttons.clone(),
                    scheduled_at,
                });
                graph.successor(idx)
            }

            NodeKind::Condition(cond) => {
                let predicate = Predicate::parse(&cond.condition).map_err(|message| {
                    ExecutionError::BadPredicate {
                        node_id: node.id.clone(),
                        message,
                    }
                })?;
                let branch =
                    BranchHandle::from_bool(predicate.evaluate(ctx.message, ctx.contact));
                match graph.branch_successor(idx, branch) {
                    Some(next) => Some(next),
                    None => {
                        return Err(ExecutionError::MissingBranch {
                            node_id: node.id.clone(),
                            branch,
                        });
                    }
                }
            }

            NodeKind::Action(action) => {
                let details = action.details.clone();
                ctx.instructions.push(match action.action {
                    ActionKind::AddTag => Instruction::AddTag { tag: details },
                    ActionKind::CallApi => Instruction::CallExternalApi { endpoint: details },
                    ActionKind::StartSequence => Instruction::StartSequence { flow_id: details },
                });
                graph.successor(idx)
            }

            NodeKind::Broadcast(bc) => {
                ctx.instructions.push(Instruction::EnqueueBroadcast {
                    content: bc.content.clone(),
                    tags: bc.tags.clone(),
                });
                graph.successor(idx)
            }
        };
    }

    Ok(())
}
