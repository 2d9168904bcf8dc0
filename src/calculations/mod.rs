pub mod backward_pass;
pub mod critical_path;
pub mod forward_pass;
pub mod free_float;

use crate::graph::NetworkGraph;

/// Working schedule values of one node, indexed like the graph's node table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTimes {
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    /// `late_start - early_start` before clamping; negative on infeasible schedules.
    pub raw_total_float: i64,
}

/// Traversal marker shared by the forward and backward passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    Unvisited,
    Computing,
    Done,
}

/// Latest anchor of the plan: fixed dates count as-is, everything else by early finish.
pub fn project_end(graph: &NetworkGraph, times: &[NodeTimes]) -> i64 {
    graph
        .anchors
        .iter()
        .zip(times)
        .fold(0, |end, (anchor, t)| end.max(anchor.unwrap_or(t.early_finish)))
}
