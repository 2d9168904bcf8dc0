use crate::node::{Node, NodeId};

/// Ids of critical nodes in input order.
///
/// Nodes anchored at day 0 are excluded even with zero float; they carry no
/// real precedence constraint.
pub fn critical_path_ids(nodes: &[Node]) -> Vec<NodeId> {
    nodes
        .iter()
        .filter(|node| node.is_critical())
        .map(|node| node.id)
        .collect()
}

/// Latest early finish of an already recalculated node set, 0 when empty.
pub fn project_duration(nodes: &[Node]) -> i64 {
    nodes.iter().map(|node| node.early_finish).max().unwrap_or(0)
}
