use crate::node::NodeId;
use crate::relation::RelationKind;
use serde::{Deserialize, Serialize};

pub type EdgeId = u32;

/// Event of a node that a link attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Finish,
}

/// Precedence link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default = "Edge::default_from_type")]
    pub from_type: Anchor,
    #[serde(default = "Edge::default_to_type")]
    pub to_type: Anchor,
    /// Lag (positive) or lead (negative) in days.
    #[serde(default)]
    pub delay: i64,
}

impl Edge {
    /// Finish-to-start link without delay.
    pub fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self::with_relation(id, from, to, RelationKind::FinishStart, 0)
    }

    pub fn with_relation(
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        relation: RelationKind,
        delay: i64,
    ) -> Self {
        let (from_type, to_type) = relation.anchors();
        Self {
            id,
            from,
            to,
            from_type,
            to_type,
            delay,
        }
    }

    pub fn relation(&self) -> RelationKind {
        RelationKind::from_anchors(self.from_type, self.to_type)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    fn default_from_type() -> Anchor {
        Anchor::Finish
    }

    fn default_to_type() -> Anchor {
        Anchor::Start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_anchors_deserialize_as_finish_start() {
        let edge: Edge = serde_json::from_str(r#"{"id":1,"from":2,"to":3}"#).unwrap();
        assert_eq!(edge.relation(), RelationKind::FinishStart);
        assert_eq!(edge.delay, 0);
    }

    #[test]
    fn explicit_anchors_select_relation() {
        let edge: Edge = serde_json::from_str(
            r#"{"id":1,"from":2,"to":3,"from_type":"start","to_type":"finish","delay":-2}"#,
        )
        .unwrap();
        assert_eq!(edge.relation(), RelationKind::StartFinish);
        assert_eq!(edge.delay, -2);
    }
}
