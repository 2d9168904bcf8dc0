use super::{Mark, NodeTimes};
use crate::graph::{Link, NetworkGraph};
use crate::relation::RelationKind;
use tracing::trace;

pub struct ForwardPass<'a> {
    graph: &'a NetworkGraph,
}

struct Frame {
    node: usize,
    next_pred: usize,
    max_constraint: i64,
}

impl Frame {
    fn new(node: usize) -> Self {
        Self {
            node,
            next_pred: 0,
            max_constraint: 0,
        }
    }
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Fill `early_start` / `early_finish` for every node.
    ///
    /// Depth-first over predecessors with an explicit stack. A predecessor that
    /// is still on the stack closes a cycle; its current values are read as-is.
    pub fn execute(&self, times: &mut [NodeTimes]) {
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
                let Some(link) = graph.predecessors[node].get(frame.next_pred).copied() else {
                    let early_start = frame.max_constraint.max(0);
                    times[node].early_start = early_start;
                    times[node].early_finish = early_start.saturating_add(graph.durations[node]);
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };

                let pred = link.node;
                if marks[pred] == Mark::Unvisited {
                    match graph.anchors[pred] {
                        Some(day) => {
                            Self::pin(&mut times[pred], day);
                            marks[pred] = Mark::Done;
                        }
                        None => {
                            marks[pred] = Mark::Computing;
                            stack.push(Frame::new(pred));
                            continue;
                        }
                    }
                } else if marks[pred] == Mark::Computing {
                    trace!(node = graph.ids[node], pred = graph.ids[pred], "cycle in forward pass");
                }

                let constraint = early_constraint(&link, &times[pred], graph.durations[node]);
                frame.max_constraint = frame.max_constraint.max(constraint);
                frame.next_pred += 1;
            }
        }
    }

    fn pin(times: &mut NodeTimes, day: i64) {
        times.early_start = day;
        times.early_finish = day;
    }
}

/// Earliest start the link allows for a node of `duration`.
fn early_constraint(link: &Link, pred: &NodeTimes, duration: i64) -> i64 {
    match link.relation {
        RelationKind::FinishStart => pred.early_finish.saturating_add(link.delay),
        RelationKind::StartStart => pred.early_start.saturating_add(link.delay),
        RelationKind::FinishFinish => pred
            .early_finish
            .saturating_sub(duration)
            .saturating_add(link.delay),
        RelationKind::StartFinish => pred
            .early_start
            .saturating_sub(duration)
            .saturating_add(link.delay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(relation: RelationKind, delay: i64) -> Link {
        Link {
            node: 0,
            edge: 0,
            relation,
            delay,
        }
    }

    #[test]
    fn constraint_per_relation() {
        let pred = NodeTimes {
            early_start: 2,
            early_finish: 6,
            ..NodeTimes::default()
        };
        assert_eq!(early_constraint(&link(RelationKind::FinishStart, 1), &pred, 3), 7);
        assert_eq!(early_constraint(&link(RelationKind::StartStart, 1), &pred, 3), 3);
        assert_eq!(early_constraint(&link(RelationKind::FinishFinish, 1), &pred, 3), 4);
        assert_eq!(early_constraint(&link(RelationKind::StartFinish, 1), &pred, 3), 0);
    }

    #[test]
    fn constraint_saturates_at_the_bounds() {
        let pred = NodeTimes {
            early_start: 0,
            early_finish: i64::MAX,
            ..NodeTimes::default()
        };
        assert_eq!(early_constraint(&link(RelationKind::FinishStart, 1), &pred, 0), i64::MAX);
        assert_eq!(
            early_constraint(&link(RelationKind::StartStart, i64::MIN), &pred, 0),
            i64::MIN
        );
        assert_eq!(
            early_constraint(&link(RelationKind::StartFinish, i64::MIN), &pred, 5),
            i64::MIN
        );
    }
}
