use crate::calculations::backward_pass::BackwardPass;
use crate::calculations::forward_pass::ForwardPass;
use crate::calculations::free_float::FreeFloatPass;
use crate::calculations::{NodeTimes, project_end};
use crate::calendar::ProjectCalendar;
use crate::edge::{Edge, EdgeId};
use crate::graph::NetworkGraph;
use crate::graph::builder::GraphBuilder;
use crate::graph::schedule_dag::ScheduleDag;
use crate::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Data the scheduler patched or tolerated while computing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    DanglingEdge { edge: EdgeId, missing_node: NodeId },
    DuplicateNodeId { node: NodeId },
    NegativeDuration { node: NodeId, duration: i64 },
    MilestoneDuration { node: NodeId, duration: i64 },
    IncompleteFixedMilestone { node: NodeId },
    FixedTask { node: NodeId },
    Cycle { nodes: Vec<NodeId> },
    InfeasibleFloat { node: NodeId, raw_total_float: i64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingEdge { edge, missing_node } => {
                write!(f, "edge {edge} references missing node {missing_node}; dropped")
            }
            Diagnostic::DuplicateNodeId { node } => {
                write!(f, "node id {node} appears more than once; later copies are unlinked")
            }
            Diagnostic::NegativeDuration { node, duration } => {
                write!(f, "node {node} has negative duration {duration}; scheduled as 0")
            }
            Diagnostic::MilestoneDuration { node, duration } => {
                write!(f, "milestone {node} has duration {duration}; scheduled as 0")
            }
            Diagnostic::IncompleteFixedMilestone { node } => {
                write!(f, "milestone {node} is fixed without a date; scheduled as computed")
            }
            Diagnostic::FixedTask { node } => {
                write!(f, "task {node} is marked fixed; only milestones can be pinned")
            }
            Diagnostic::Cycle { nodes } => {
                let chain = nodes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "precedence cycle through nodes [{chain}]")
            }
            Diagnostic::InfeasibleFloat {
                node,
                raw_total_float,
            } => write!(
                f,
                "node {node} has negative total float {raw_total_float}; clamped to 0"
            ),
        }
    }
}

/// Result of [`Scheduler::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub nodes: Vec<Node>,
    pub project_end: i64,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScheduleReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn critical_path(&self) -> Vec<NodeId> {
        crate::calculations::critical_path::critical_path_ids(&self.nodes)
    }

    pub fn project_duration(&self) -> i64 {
        crate::calculations::critical_path::project_duration(&self.nodes)
    }
}

/// CPM scheduler over a graph snapshot. Holds only the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduler {
    calendar: ProjectCalendar,
}

impl Scheduler {
    pub fn new(calendar: ProjectCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &ProjectCalendar {
        &self.calendar
    }

    /// Fresh copy of `nodes` (same order) with every schedule field recomputed.
    pub fn recalculate(&self, nodes: &[Node], edges: &[Edge]) -> Vec<Node> {
        self.analyze(nodes, edges).nodes
    }

    /// Like [`Scheduler::recalculate`], also reporting what was patched.
    pub fn analyze(&self, nodes: &[Node], edges: &[Edge]) -> ScheduleReport {
        let graph = GraphBuilder::new(nodes, edges, &self.calendar).build();
        let mut times = vec![NodeTimes::default(); graph.len()];

        ForwardPass::new(&graph).execute(&mut times);
        let end = project_end(&graph, &times);
        BackwardPass::new(&graph).execute(&mut times, end);
        FreeFloatPass::new(&graph).execute(&mut times);

        let scheduled: Vec<Node> = nodes
            .iter()
            .zip(&times)
            .map(|(node, t)| {
                let mut node = node.clone();
                node.clear_schedule();
                node.early_start = t.early_start;
                node.early_finish = t.early_finish;
                node.late_start = t.late_start;
                node.late_finish = t.late_finish;
                node.total_float = t.total_float;
                node.free_float = t.free_float;
                node
            })
            .collect();

        let diagnostics = collect_diagnostics(nodes, &graph, &times);
        debug!(
            nodes = graph.len(),
            links = graph.link_count(),
            project_end = end,
            diagnostics = diagnostics.len(),
            "recalculated network plan"
        );

        ScheduleReport {
            nodes: scheduled,
            project_end: end,
            diagnostics,
        }
    }
}

fn collect_diagnostics(nodes: &[Node], graph: &NetworkGraph, times: &[NodeTimes]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for dropped in &graph.dropped_edges {
        diagnostics.push(Diagnostic::DanglingEdge {
            edge: dropped.edge,
            missing_node: dropped.missing,
        });
    }
    for &node in &graph.duplicate_ids {
        diagnostics.push(Diagnostic::DuplicateNodeId { node });
    }

    for node in nodes {
        if node.is_milestone() {
            if node.duration != 0 {
                diagnostics.push(Diagnostic::MilestoneDuration {
                    node: node.id,
                    duration: node.duration,
                });
            }
            if node.is_fixed && node.fixed_date.is_none() {
                diagnostics.push(Diagnostic::IncompleteFixedMilestone { node: node.id });
            }
        } else {
            if node.duration < 0 {
                diagnostics.push(Diagnostic::NegativeDuration {
                    node: node.id,
                    duration: node.duration,
                });
            }
            if node.is_fixed {
                diagnostics.push(Diagnostic::FixedTask { node: node.id });
            }
        }
    }

    let dag = ScheduleDag::build(graph);
    if dag.has_cycle() {
        for nodes in dag.cycles() {
            diagnostics.push(Diagnostic::Cycle { nodes });
        }
    }

    for (idx, t) in times.iter().enumerate() {
        if t.raw_total_float < 0 {
            diagnostics.push(Diagnostic::InfeasibleFloat {
                node: graph.ids[idx],
                raw_total_float: t.raw_total_float,
            });
        }
    }

    diagnostics
}

/// Recalculate with the default calendar (epoch 2025-01-01).
pub fn recalculate(nodes: &[Node], edges: &[Edge]) -> Vec<Node> {
    Scheduler::default().recalculate(nodes, edges)
}

/// Analyze with the default calendar (epoch 2025-01-01).
pub fn analyze(nodes: &[Node], edges: &[Edge]) -> ScheduleReport {
    Scheduler::default().analyze(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_comes_back_empty() {
        let report = analyze(&[], &[]);
        assert!(report.nodes.is_empty());
        assert_eq!(report.project_end, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn stale_schedule_fields_are_overwritten() {
        let mut node = Node::task(1, "A", 2);
        node.early_start = 40;
        node.late_finish = -3;
        node.total_float = 9;
        let out = recalculate(&[node], &[]);
        assert_eq!(out[0].early_start, 0);
        assert_eq!(out[0].late_finish, 2);
        assert_eq!(out[0].total_float, 0);
    }

    #[test]
    fn diagnostics_report_patched_input() {
        let mut negative = Node::task(1, "A", -2);
        negative.is_fixed = true;
        let mut milestone = Node::milestone(2, "M");
        milestone.is_fixed = true;
        let nodes = vec![negative, milestone, Node::task(3, "C", 1), Node::task(3, "C'", 1)];
        let edges = vec![Edge::new(10, 1, 99)];

        let report = analyze(&nodes, &edges);
        assert!(report.diagnostics.contains(&Diagnostic::DanglingEdge {
            edge: 10,
            missing_node: 99
        }));
        assert!(report.diagnostics.contains(&Diagnostic::DuplicateNodeId { node: 3 }));
        assert!(report.diagnostics.contains(&Diagnostic::NegativeDuration {
            node: 1,
            duration: -2
        }));
        assert!(report.diagnostics.contains(&Diagnostic::FixedTask { node: 1 }));
        assert!(report
            .diagnostics
            .contains(&Diagnostic::IncompleteFixedMilestone { node: 2 }));
    }

    #[test]
    fn diagnostic_messages_name_the_node() {
        let message = Diagnostic::InfeasibleFloat {
            node: 7,
            raw_total_float: -3,
        }
        .to_string();
        assert!(message.contains("node 7"));
        assert!(message.contains("-3"));
    }
}
