use crate::errors::ValidationError;
use crate::node::{Node, NodeKind};
use std::collections::HashSet;

/// Store-side checks; the scheduler itself tolerates all of these.
pub fn validate_node(node: &Node) -> Result<(), ValidationError> {
    match node.kind {
        NodeKind::Task => {
            if node.duration < 0 {
                return Err(ValidationError::new(format!(
                    "task {} has negative duration {}",
                    node.id, node.duration
                )));
            }
            if node.is_fixed || node.fixed_date.is_some() {
                return Err(ValidationError::new(format!(
                    "task {} cannot be pinned to a date; only milestones can be fixed",
                    node.id
                )));
            }
        }
        NodeKind::Milestone => {
            if node.duration != 0 {
                return Err(ValidationError::new(format!(
                    "milestone {} must have duration 0 (got {})",
                    node.id, node.duration
                )));
            }
            if node.is_fixed != node.fixed_date.is_some() {
                return Err(ValidationError::new(format!(
                    "milestone {} must carry a fixed date exactly when it is fixed",
                    node.id
                )));
            }
        }
    }
    Ok(())
}

pub fn validate_node_collection(nodes: &[Node]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen_ids.insert(node.id) {
            return Err(ValidationError::new(format!("duplicate node id {}", node.id)));
        }
        validate_node(node)?;
    }
    Ok(())
}
