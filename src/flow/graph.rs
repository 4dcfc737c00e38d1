use crate::error::StructureError;
use crate::flow::{BranchHandle, FlowDocument, Node, NodeId};
use ahash::AHashMap;

/// An outgoing connection, resolved to a node index in the arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutEdge {
    pub handle: Option<BranchHandle>,
    pub target: usize,
}

/// Index view over a flow document: nodes stay in their flat `Vec` (the
/// arena), edges become adjacency lists of indices. Built once per validation
/// or execution; O(1) lookups keep the cycle check and the visited set cheap.
pub(crate) struct FlowGraph<'a> {
    nodes: &'a [Node],
    index: AHashMap<&'a str, usize>,
    outgoing: Vec<Vec<OutEdge>>,
    incoming: Vec<usize>,
}

impl<'a> FlowGraph<'a> {
    /// Builds the index. Fails if two nodes share an id or any edge references
    /// a node id that is not in the document.
    pub fn build(doc: &'a FlowDocument) -> Result<Self, StructureError> {
        let mut index = AHashMap::with_capacity(doc.nodes.len());
        for (i, node) in doc.nodes.iter().enumerate() {
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(StructureError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut outgoing = vec![Vec::new(); doc.nodes.len()];
        let mut incoming = vec![0usize; doc.nodes.len()];
        for edge in &doc.edges {
            let source = *index.get(edge.source.as_str()).ok_or_else(|| {
                StructureError::UnknownNode {
                    edge_id: edge.id.clone(),
                    node_id: edge.source.clone(),
                }
            })?;
            let target = *index.get(edge.target.as_str()).ok_or_else(|| {
                StructureError::UnknownNode {
                    edge_id: edge.id.clone(),
                    node_id: edge.target.clone(),
                }
            })?;
            outgoing[source].push(OutEdge {
                handle: edge.source_handle,
                target,
            });
            incoming[target] += 1;
        }

        Ok(Self {
            nodes: &doc.nodes,
            index,
            outgoing,
            incoming,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: usize) -> &'a Node {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id.as_str()).copied()
    }

    /// Outgoing edges of a node, in document insertion order.
    pub fn outgoing(&self, idx: usize) -> &[OutEdge] {
        &self.outgoing[idx]
    }

    pub fn incoming_count(&self, idx: usize) -> usize {
        self.incoming[idx]
    }

    /// The single unconditional successor of a node, if any.
    pub fn successor(&self, idx: usize) -> Option<usize> {
        self.outgoing[idx].first().map(|e| e.target)
    }

    /// The successor of a condition node along the given branch.
    pub fn branch_successor(&self, idx: usize, branch: BranchHandle) -> Option<usize> {
        self.outgoing[idx]
            .iter()
            .find(|e| e.handle == Some(branch))
            .map(|e| e.target)
    }
}
