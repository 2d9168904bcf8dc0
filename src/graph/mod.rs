use crate::edge::EdgeId;
use crate::node::NodeId;
use crate::relation::RelationKind;
use std::collections::HashMap;

/// One precedence descriptor in an adjacency list.
///
/// `node` is the index of the linked node in the input order, not its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub node: usize,
    pub edge: EdgeId,
    pub relation: RelationKind,
    pub delay: i64,
}

/// Edge that referenced a node id absent from the node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedEdge {
    pub edge: EdgeId,
    pub missing: NodeId,
}

/// Index-based adjacency of a graph snapshot.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    pub ids: Vec<NodeId>,
    pub durations: Vec<i64>,
    /// Day index of fixed milestones, `None` for computed nodes.
    pub anchors: Vec<Option<i64>>,
    pub successors: Vec<Vec<Link>>,
    pub predecessors: Vec<Vec<Link>>,
    pub index_of: HashMap<NodeId, usize>,
    pub dropped_edges: Vec<DroppedEdge>,
    pub duplicate_ids: Vec<NodeId>,
}

impl NetworkGraph {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    pub fn is_fixed(&self, idx: usize) -> bool {
        self.anchors[idx].is_some()
    }
}

pub mod builder;
pub mod schedule_dag;
