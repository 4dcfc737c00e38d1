use crate::error::{PayloadError, StructureError, ValidationError};
use crate::flow::graph::FlowGraph;
use crate::flow::{
    BranchHandle, FlowDocument, NodeId, NodeKind, PlatformSelectorNode, TriggerNode,
};
use crate::interpreter::Predicate;
use ahash::AHashSet;
use itertools::Itertools;

/// Maximum quick-reply buttons a message node may carry.
pub const MAX_BUTTONS: usize = 3;

/// Maximum delay a message node may schedule, in seconds (30 days). Keeps
/// delays well inside what timestamp arithmetic can represent.
pub const MAX_DELAY_SECS: u64 = 30 * 24 * 60 * 60;

/// A flow document that passed validation. Holds the normalized document
/// (duplicate edges collapsed, deterministic order) and the resolved entry
/// chain. This is the only form the interpreter accepts for full execution.
#[derive(Debug, Clone)]
pub struct ValidatedFlow {
    doc: FlowDocument,
    trigger: NodeId,
    selector: Option<NodeId>,
}

impl ValidatedFlow {
    pub fn document(&self) -> &FlowDocument {
        &self.doc
    }

    /// Id of the flow's single trigger node.
    pub fn trigger_id(&self) -> &NodeId {
        &self.trigger
    }

    /// Id of the platform selector upstream of the trigger, if the flow has
    /// one.
    pub fn selector_id(&self) -> Option<&NodeId> {
        self.selector.as_ref()
    }

    /// The node execution starts from: the platform selector when present,
    /// otherwise the trigger.
    pub fn entry_id(&self) -> &NodeId {
        self.selector.as_ref().unwrap_or(&self.trigger)
    }

    /// Payload of the trigger node. Guaranteed present post-validation.
    pub fn trigger_node(&self) -> &TriggerNode {
        self.doc
            .nodes
            .iter()
            .find_map(|n| match (n.id == self.trigger, &n.kind) {
                (true, NodeKind::Trigger(t)) => Some(t),
                _ => None,
            })
            .expect("validated flow always has its trigger node")
    }

    /// Payload of the platform selector, when the flow has one.
    pub fn selector_node(&self) -> Option<&PlatformSelectorNode> {
        let id = self.selector.as_ref()?;
        self.doc.nodes.iter().find_map(|n| match (&n.id == id, &n.kind) {
            (true, NodeKind::PlatformSelector(s)) => Some(s),
            _ => None,
        })
    }
}

/// Checks a flow document for structural soundness and payload validity.
///
/// This gate must run (and pass) before a flow may be flipped to active.
/// Pure: the input document is not mutated; normalization happens on a copy.
///
/// Structure rules: exactly one trigger-reachable entry point (a lone trigger,
/// or a platform selector wired directly into the trigger); every edge resolves
/// to existing nodes; condition nodes carry exactly a `true` and a `false`
/// branch; other kinds have at most one outgoing edge; the graph reachable
/// from the entry is acyclic. Orphan nodes (no edges at all) are permitted and
/// skipped; they are editor leftovers that never execute.
pub fn validate(doc: &FlowDocument) -> Result<ValidatedFlow, ValidationError> {
    // Resolve edge endpoints before anything else; a dangling reference makes
    // every later check meaningless.
    FlowGraph::build(doc).map_err(ValidationError::Structure)?;

    let doc = normalize(doc);
    let graph = FlowGraph::build(&doc).expect("normalization preserves endpoints");

    let (trigger, selector) = resolve_entry(&doc, &graph)?;
    let entry = selector.as_ref().unwrap_or(&trigger);
    let entry_idx = graph
        .index_of(entry)
        .expect("entry resolved from the same document");

    let reachable = check_acyclic_from(&graph, entry_idx)?;
    check_structure(&doc, &graph, &reachable)?;
    check_payloads(&doc, &reachable)?;

    Ok(ValidatedFlow {
        doc,
        trigger,
        selector,
    })
}

/// Collapses duplicate edges (same source, target and handle, keeping the
/// first occurrence) while preserving insertion order. Idempotent.
fn normalize(doc: &FlowDocument) -> FlowDocument {
    let edges = doc
        .edges
        .iter()
        .unique_by(|e| (e.source.clone(), e.target.clone(), e.source_handle))
        .cloned()
        .collect();
    FlowDocument {
        nodes: doc.nodes.clone(),
        edges,
    }
}

/// Finds the single entry chain: one trigger, optionally preceded by one
/// platform selector wired directly into it.
fn resolve_entry(
    doc: &FlowDocument,
    graph: &FlowGraph<'_>,
) -> Result<(NodeId, Option<NodeId>), StructureError> {
    let mut trigger: Option<usize> = None;
    let mut selector: Option<usize> = None;

    for (i, node) in doc.nodes.iter().enumerate() {
        match &node.kind {
            NodeKind::Trigger(_) => {
                if trigger.is_some() {
                    return Err(StructureError::MultipleTriggers(node.id.clone()));
                }
                trigger = Some(i);
            }
            NodeKind::PlatformSelector(_) => {
                // A selector with no edges at all is an orphan and is ignored.
                if graph.outgoing(i).is_empty() && graph.incoming_count(i) == 0 {
                    continue;
                }
                if selector.is_some() {
                    return Err(StructureError::MultiplePlatformSelectors(node.id.clone()));
                }
                selector = Some(i);
            }
            _ => {}
        }
    }

    let trigger = trigger.ok_or(StructureError::MissingTrigger)?;

    if let Some(sel) = selector {
        match graph.successor(sel) {
            Some(target) if target == trigger => {}
            other => {
                let target_id = other
                    .map(|t| graph.node(t).id.clone())
                    .unwrap_or_else(|| "nothing".to_string());
                return Err(StructureError::SelectorNotBeforeTrigger {
                    selector_id: graph.node(sel).id.clone(),
                    target_id,
                });
            }
        }
    }

    Ok((
        graph.node(trigger).id.clone(),
        selector.map(|s| graph.node(s).id.clone()),
    ))
}

/// Iterative DFS from the entry. Returns the set of reachable node indices,
/// or the first back-edge target if a cycle is reachable. Revisiting a node
/// mid-execution is undefined, so cyclic documents are rejected outright
/// rather than looped.
fn check_acyclic_from(
    graph: &FlowGraph<'_>,
    entry: usize,
) -> Result<AHashSet<usize>, StructureError> {
    let mut visited = AHashSet::with_capacity(graph.len());
    let mut in_stack = AHashSet::new();
    // (node, next outgoing edge to explore)
    let mut stack: Vec<(usize, usize)> = vec![(entry, 0)];
    in_stack.insert(entry);
    visited.insert(entry);

    while let Some((node, cursor)) = stack.pop() {
        let out = graph.outgoing(node);
        if cursor >= out.len() {
            in_stack.remove(&node);
            continue;
        }
        stack.push((node, cursor + 1));

        let next = out[cursor].target;
        if in_stack.contains(&next) {
            return Err(StructureError::CycleDetected {
                node_id: graph.node(next).id.clone(),
            });
        }
        if visited.insert(next) {
            in_stack.insert(next);
            stack.push((next, 0));
        }
    }

    Ok(visited)
}

/// Branch and fan-out rules for every node reachable from the entry.
fn check_structure(
    doc: &FlowDocument,
    graph: &FlowGraph<'_>,
    reachable: &AHashSet<usize>,
) -> Result<(), StructureError> {
    for (i, node) in doc.nodes.iter().enumerate() {
        if !reachable.contains(&i) {
            continue;
        }
        let out = graph.outgoing(i);
        match &node.kind {
            NodeKind::Condition(_) => {
                if out.iter().any(|e| e.handle.is_none()) {
                    return Err(StructureError::UnlabeledConditionEdge {
                        node_id: node.id.clone(),
                    });
                }
                for branch in [BranchHandle::True, BranchHandle::False] {
                    if graph.branch_successor(i, branch).is_none() {
                        return Err(StructureError::MissingBranch {
                            node_id: node.id.clone(),
                            branch,
                        });
                    }
                }
                if out.len() > 2 {
                    return Err(StructureError::TooManyOutgoingEdges {
                        node_id: node.id.clone(),
                        count: out.len(),
                    });
                }
            }
            _ => {
                if out.len() > 1 {
                    return Err(StructureError::TooManyOutgoingEdges {
                        node_id: node.id.clone(),
                        count: out.len(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Kind-specific payload checks for every node reachable from the entry.
fn check_payloads(doc: &FlowDocument, reachable: &AHashSet<usize>) -> Result<(), PayloadError> {
    for (i, node) in doc.nodes.iter().enumerate() {
        if !reachable.contains(&i) {
            continue;
        }
        match &node.kind {
            NodeKind::Trigger(_) => {
                // An empty keyword set is a valid catch-all trigger.
            }
            NodeKind::Message(msg) => {
                if msg.content.trim().is_empty() {
                    return Err(PayloadError::EmptyMessageContent(node.id.clone()));
                }
                if msg.buttons.len() > MAX_BUTTONS {
                    return Err(PayloadError::TooManyButtons {
                        node_id: node.id.clone(),
                        count: msg.buttons.len(),
                        max: MAX_BUTTONS,
                    });
                }
                if let Some(delay) = msg.delay {
                    if delay > MAX_DELAY_SECS {
                        return Err(PayloadError::DelayTooLong {
                            node_id: node.id.clone(),
                            delay,
                            max: MAX_DELAY_SECS,
                        });
                    }
                }
            }
            NodeKind::Condition(cond) => {
                if cond.condition.trim().is_empty() {
                    return Err(PayloadError::EmptyPredicate(node.id.clone()));
                }
                Predicate::parse(&cond.condition).map_err(|message| {
                    PayloadError::InvalidPredicate {
                        node_id: node.id.clone(),
                        message,
                    }
                })?;
            }
            NodeKind::Action(action) => {
                if action.details.trim().is_empty() {
                    return Err(PayloadError::EmptyActionDetails(node.id.clone()));
                }
            }
            NodeKind::Broadcast(bc) => {
                if bc.content.trim().is_empty() {
                    return Err(PayloadError::EmptyBroadcastContent(node.id.clone()));
                }
            }
            NodeKind::PlatformSelector(sel) => {
                if sel.selected_platforms.is_empty() {
                    return Err(PayloadError::NoPlatformsSelected(node.id.clone()));
                }
            }
        }
    }
    Ok(())
}
