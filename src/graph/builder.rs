use super::{DroppedEdge, Link, NetworkGraph};
use crate::calendar::ProjectCalendar;
use crate::edge::Edge;
use crate::node::Node;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub struct GraphBuilder<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    calendar: &'a ProjectCalendar,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(nodes: &'a [Node], edges: &'a [Edge], calendar: &'a ProjectCalendar) -> Self {
        Self {
            nodes,
            edges,
            calendar,
        }
    }

    pub fn build(&self) -> NetworkGraph {
        let n = self.nodes.len();
        let mut graph = NetworkGraph {
            ids: Vec::with_capacity(n),
            durations: Vec::with_capacity(n),
            anchors: Vec::with_capacity(n),
            successors: vec![Vec::new(); n],
            predecessors: vec![Vec::new(); n],
            index_of: HashMap::with_capacity(n),
            dropped_edges: Vec::new(),
            duplicate_ids: Vec::new(),
        };

        // Step 1: node table, first occurrence of an id owns it
        for (idx, node) in self.nodes.iter().enumerate() {
            graph.ids.push(node.id);
            graph.durations.push(node.scheduled_duration());
            graph
                .anchors
                .push(node.fixed_anchor().map(|date| self.calendar.day_index(date)));

            match graph.index_of.entry(node.id) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(_) => graph.duplicate_ids.push(node.id),
            }
        }

        // Step 2: links in edge order; parallel edges are kept
        for edge in self.edges {
            let from = graph.index_of.get(&edge.from).copied();
            let to = graph.index_of.get(&edge.to).copied();
            let (from, to) = match (from, to) {
                (Some(from), Some(to)) => (from, to),
                (None, _) => {
                    graph.dropped_edges.push(DroppedEdge {
                        edge: edge.id,
                        missing: edge.from,
                    });
                    continue;
                }
                (_, None) => {
                    graph.dropped_edges.push(DroppedEdge {
                        edge: edge.id,
                        missing: edge.to,
                    });
                    continue;
                }
            };

            let relation = edge.relation();
            graph.successors[from].push(Link {
                node: to,
                edge: edge.id,
                relation,
                delay: edge.delay,
            });
            graph.predecessors[to].push(Link {
                node: from,
                edge: edge.id,
                relation,
                delay: edge.delay,
            });
        }

        graph
    }
}
