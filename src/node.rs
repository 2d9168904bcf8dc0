use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Task,
    Milestone,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Task => "task",
            NodeKind::Milestone => "milestone",
        }
    }
}

/// A task or milestone of the network plan.
///
/// The schedule fields (`early_start` .. `free_float`) are day offsets from the
/// plan epoch and are overwritten on every recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub early_start: i64,
    #[serde(default)]
    pub early_finish: i64,
    #[serde(default)]
    pub late_start: i64,
    #[serde(default)]
    pub late_finish: i64,
    #[serde(default)]
    pub total_float: i64,
    #[serde(default)]
    pub free_float: i64,
}

impl Node {
    pub fn task(id: NodeId, name: impl Into<String>, duration: i64) -> Self {
        Self::blank(id, name.into(), NodeKind::Task, duration)
    }

    pub fn milestone(id: NodeId, name: impl Into<String>) -> Self {
        Self::blank(id, name.into(), NodeKind::Milestone, 0)
    }

    pub fn fixed_milestone(id: NodeId, name: impl Into<String>, date: NaiveDate) -> Self {
        let mut node = Self::milestone(id, name);
        node.is_fixed = true;
        node.fixed_date = Some(date);
        node
    }

    fn blank(id: NodeId, name: String, kind: NodeKind, duration: i64) -> Self {
        Self {
            id,
            name,
            kind,
            duration,
            is_fixed: false,
            fixed_date: None,
            note: None,
            early_start: 0,
            early_finish: 0,
            late_start: 0,
            late_finish: 0,
            total_float: 0,
            free_float: 0,
        }
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == NodeKind::Milestone
    }

    /// Pinned date of a fixed milestone. Tasks and incomplete pins yield `None`.
    pub fn fixed_anchor(&self) -> Option<NaiveDate> {
        if self.is_milestone() && self.is_fixed {
            self.fixed_date
        } else {
            None
        }
    }

    /// Duration used for scheduling: milestones are always 0, negatives coalesce to 0.
    pub fn scheduled_duration(&self) -> i64 {
        if self.is_milestone() {
            0
        } else {
            self.duration.max(0)
        }
    }

    /// Critical means no total float and a start pushed past the epoch.
    pub fn is_critical(&self) -> bool {
        self.total_float == 0 && self.early_start > 0
    }

    pub(crate) fn clear_schedule(&mut self) {
        self.early_start = 0;
        self.early_finish = 0;
        self.late_start = 0;
        self.late_finish = 0;
        self.total_float = 0;
        self.free_float = 0;
    }
}
