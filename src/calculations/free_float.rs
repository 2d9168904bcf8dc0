use super::NodeTimes;
use crate::graph::{Link, NetworkGraph};
use crate::relation::RelationKind;
use rayon::prelude::*;

pub struct FreeFloatPass<'a> {
    graph: &'a NetworkGraph,
}

impl<'a> FreeFloatPass<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Fill `free_float` from direct successors' early dates.
    ///
    /// Runs after both passes; every node only reads finalized values, so the
    /// nodes are evaluated in parallel. The result never exceeds total float.
    pub fn execute(&self, times: &mut [NodeTimes]) {
        let graph = self.graph;
        let snapshot: &[NodeTimes] = times;

        let free_floats: Vec<i64> = (0..graph.len())
            .into_par_iter()
            .map(|idx| {
                let own = &snapshot[idx];
                let earliest_successor = graph.successors[idx]
                    .iter()
                    .map(|link| successor_bound(link, &snapshot[link.node], graph.durations[idx]))
                    .min();
                let free_float = match earliest_successor {
                    Some(bound) => bound.saturating_sub(own.early_finish).max(0),
                    None => own.total_float,
                };
                free_float.min(own.total_float)
            })
            .collect();

        for (t, free_float) in times.iter_mut().zip(free_floats) {
            t.free_float = free_float;
        }
    }
}

/// Successor event time measured against this node's early finish.
fn successor_bound(link: &Link, succ: &NodeTimes, duration: i64) -> i64 {
    match link.relation {
        RelationKind::FinishStart => succ.early_start,
        RelationKind::StartStart => succ.early_start.saturating_add(duration),
        RelationKind::FinishFinish => succ.early_finish,
        RelationKind::StartFinish => succ.early_finish.saturating_add(duration),
    }
}
