use super::NetworkGraph;
use crate::node::NodeId;
use crate::relation::RelationKind;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

/// petgraph view of the adjacency, used for structural queries.
pub struct ScheduleDag {
    pub graph: DiGraph<NodeId, RelationKind>,
}

impl ScheduleDag {
    pub fn build(network: &NetworkGraph) -> Self {
        let mut graph: DiGraph<NodeId, RelationKind> =
            DiGraph::with_capacity(network.len(), network.link_count());

        // Node indices line up with input positions
        for &id in &network.ids {
            graph.add_node(id);
        }

        for (from, links) in network.successors.iter().enumerate() {
            for link in links {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(link.node), link.relation);
            }
        }

        Self { graph }
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Node groups that sit on a precedence cycle, including self-links.
    ///
    /// Members of each group are listed in input order; groups are ordered by
    /// their first member.
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let mut groups: Vec<Vec<usize>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut members: Vec<usize> =
                    component.into_iter().map(|ix| ix.index()).collect();
                members.sort_unstable();
                members
            })
            .collect();
        groups.sort_by_key(|members| members[0]);

        groups
            .into_iter()
            .map(|members| members.into_iter().map(|idx| self.graph[NodeIndex::new(idx)]).collect())
            .collect()
    }
}
