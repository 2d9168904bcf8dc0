use super::{Mark, NodeTimes};
use crate::graph::{Link, NetworkGraph};
use crate::relation::RelationKind;
use tracing::trace;

pub struct BackwardPass<'a> {
    graph: &'a NetworkGraph,
}

struct Frame {
    node: usize,
    next_succ: usize,
    min_constraint: Option<i64>,
}

impl Frame {
    fn new(node: usize) -> Self {
        Self {
            node,
            next_succ: 0,
            min_constraint: None,
        }
    }
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Fill late dates and total float. Early dates must already be final.
    ///
    /// Nodes without successors finish no earlier than `project_end`.
    pub fn execute(&self, times: &mut [NodeTimes], project_end: i64) {
        let graph = self.graph;
        let mut marks = vec![Mark::Unvisited; graph.len()];
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..graph.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            if let Some(day) = graph.anchors[root] {
                Self::pin(&mut times[root], day);
                marks[root] = Mark::Done;
                continue;
            }
            marks[root] = Mark::Computing;
            stack.push(Frame::new(root));

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                let Some(link) = graph.successors[node].get(frame.next_succ).copied() else {
                    let late_finish = frame
                        .min_constraint
                        .unwrap_or_else(|| times[node].early_finish.max(project_end));
                    Self::settle(&mut times[node], late_finish, graph.durations[node]);
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };

                let succ = link.node;
                if marks[succ] == Mark::Unvisited {
                    match graph.anchors[succ] {
                        Some(day) => {
                            Self::pin(&mut times[succ], day);
                            marks[succ] = Mark::Done;
                        }
                        None => {
                            marks[succ] = Mark::Computing;
                            stack.push(Frame::new(succ));
                            continue;
                        }
                    }
                } else if marks[succ] == Mark::Computing {
                    trace!(node = graph.ids[node], succ = graph.ids[succ], "cycle in backward pass");
                }

                let constraint = late_constraint(&link, &times[succ], graph.durations[node]);
                frame.min_constraint = Some(match frame.min_constraint {
                    Some(current) => current.min(constraint),
                    None => constraint,
                });
                frame.next_succ += 1;
            }
        }
    }

    fn pin(times: &mut NodeTimes, day: i64) {
        Self::settle(times, day, 0);
    }

    fn settle(times: &mut NodeTimes, late_finish: i64, duration: i64) {
        times.late_finish = late_finish;
        times.late_start = late_finish.saturating_sub(duration);
        times.raw_total_float = times.late_start.saturating_sub(times.early_start);
        times.total_float = times.raw_total_float.max(0);
    }
}

/// Latest finish the link allows for a node of `duration`. Saturates at the
/// `i64` bounds.
fn late_constraint(link: &Link, succ: &NodeTimes, duration: i64) -> i64 {
    match link.relation {
        RelationKind::FinishStart => succ.late_start.saturating_sub(link.delay),
        RelationKind::StartStart => succ
            .late_start
            .saturating_add(duration)
            .saturating_sub(link.delay),
        RelationKind::FinishFinish => succ.late_finish.saturating_sub(link.delay),
        RelationKind::StartFinish => succ
            .late_finish
            .saturating_add(duration)
            .saturating_sub(link.delay),
    }
}
