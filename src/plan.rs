use crate::calculations::critical_path::{critical_path_ids, project_duration};
use crate::calendar::ProjectCalendar;
use crate::edge::{Anchor, Edge, EdgeId};
use crate::errors::{PlanError, PlanResult, ValidationError};
use crate::metadata::PlanMetadata;
use crate::node::{Node, NodeId, NodeKind};
use crate::relation::RelationKind;
use crate::schedule::{Diagnostic, Scheduler};
use crate::validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Duration given to tasks created without one.
pub const DEFAULT_TASK_DURATION: i64 = 5;

/// Incrementing id counter owned by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    next: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Make sure future ids are greater than `id`.
    pub fn advance_past(&mut self, id: u32) {
        if self.next <= id {
            self.next = id.saturating_add(1);
        }
    }
}

/// Payload for creating a node; absent fields take the plan defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub fixed_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Partial node edit. `is_fixed: Some(false)` unpins a milestone; an empty
/// `note` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub is_fixed: Option<bool>,
    #[serde(default)]
    pub fixed_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Payload for creating a link; anchors default to finish-to-start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default = "NewEdge::default_from_type")]
    pub from_type: Anchor,
    #[serde(default = "NewEdge::default_to_type")]
    pub to_type: Anchor,
    #[serde(default)]
    pub delay: i64,
}

impl NewEdge {
    pub fn relation(&self) -> RelationKind {
        RelationKind::from_anchors(self.from_type, self.to_type)
    }

    fn default_from_type() -> Anchor {
        Anchor::Finish
    }

    fn default_to_type() -> Anchor {
        Anchor::Start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub project_name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<NodeId>,
    pub project_duration: i64,
    pub project_finish: NaiveDate,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("nodes={}", self.node_count));
        parts.push(format!("edges={}", self.edge_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}d", self.project_duration));
        parts.push(format!("finish={}", self.project_finish));
        if !self.critical_path.is_empty() {
            let chain = self
                .critical_path
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("crit=[{}]", chain));
        }
        if !self.diagnostics.is_empty() {
            parts.push(format!("warnings={}", self.diagnostics.len()));
        }
        parts.join(", ")
    }
}

/// Caller-side owner of a network plan.
///
/// Every structural change recalculates the whole schedule before returning,
/// so readers always see annotations that match the current graph.
#[derive(Debug, Clone)]
pub struct NetworkPlan {
    metadata: PlanMetadata,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_ids: IdSequence,
    edge_ids: IdSequence,
    project_end: i64,
    diagnostics: Vec<Diagnostic>,
}

impl Default for NetworkPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkPlan {
    pub fn new() -> Self {
        Self::with_metadata(PlanMetadata::default())
    }

    pub fn with_metadata(metadata: PlanMetadata) -> Self {
        Self {
            metadata,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_ids: IdSequence::default(),
            edge_ids: IdSequence::default(),
            project_end: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Build a plan from existing nodes and edges, validating both.
    pub fn from_parts(
        metadata: PlanMetadata,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> PlanResult<Self> {
        validation::validate_node_collection(&nodes)?;
        let mut plan = Self::with_metadata(metadata);
        for node in &nodes {
            plan.node_ids.advance_past(node.id);
        }
        plan.nodes = nodes;

        let mut seen_edges = HashSet::with_capacity(edges.len());
        for edge in &edges {
            if !seen_edges.insert(edge.id) {
                return Err(ValidationError::new(format!("duplicate edge id {}", edge.id)).into());
            }
            plan.check_link(edge.from, edge.to, &plan.edges)?;
            plan.edges.push(edge.clone());
            plan.edge_ids.advance_past(edge.id);
        }

        plan.refresh();
        Ok(plan)
    }

    pub fn metadata(&self) -> &PlanMetadata {
        &self.metadata
    }

    pub fn calendar(&self) -> ProjectCalendar {
        self.metadata.calendar()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn project_end(&self) -> i64 {
        self.project_end
    }

    pub fn critical_path(&self) -> Vec<NodeId> {
        critical_path_ids(&self.nodes)
    }

    /// Replace the metadata; a new epoch re-anchors fixed milestones.
    pub fn set_metadata(&mut self, metadata: PlanMetadata) {
        self.metadata = metadata;
        self.refresh();
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.metadata.project_name = name.into();
    }

    pub fn set_planning_epoch(&mut self, epoch: NaiveDate) {
        self.metadata.planning_epoch = epoch;
        self.refresh();
    }

    pub fn add_task(&mut self, name: Option<&str>, duration: i64) -> PlanResult<NodeId> {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Task {}", self.count_kind(NodeKind::Task) + 1),
        };
        let node = Node::task(self.node_ids.peek(), name, duration);
        self.insert(node)
    }

    pub fn add_milestone(
        &mut self,
        name: Option<&str>,
        fixed_date: Option<NaiveDate>,
    ) -> PlanResult<NodeId> {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Milestone {}", self.count_kind(NodeKind::Milestone) + 1),
        };
        let id = self.node_ids.peek();
        let node = match fixed_date {
            Some(date) => Node::fixed_milestone(id, name, date),
            None => Node::milestone(id, name),
        };
        self.insert(node)
    }

    pub fn add_node(&mut self, request: NewNode) -> PlanResult<NodeId> {
        let id = match request.kind {
            NodeKind::Task => self.add_task(
                request.name.as_deref(),
                request.duration.unwrap_or(DEFAULT_TASK_DURATION),
            )?,
            NodeKind::Milestone => {
                if let Some(duration) = request.duration.filter(|d| *d != 0) {
                    return Err(ValidationError::new(format!(
                        "milestone must have duration 0 (got {duration})"
                    ))
                    .into());
                }
                self.add_milestone(request.name.as_deref(), request.fixed_date)?
            }
        };
        if let Some(note) = request.note {
            self.set_note(id, &note)?;
        }
        Ok(id)
    }

    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> PlanResult<&Node> {
        let mut candidate = self.node(id).cloned().ok_or(PlanError::NodeNotFound(id))?;
        if let Some(name) = update.name {
            candidate.name = name;
        }
        if let Some(duration) = update.duration {
            candidate.duration = duration;
        }
        if let Some(date) = update.fixed_date {
            candidate.fixed_date = Some(date);
            candidate.is_fixed = true;
        }
        match update.is_fixed {
            Some(false) => {
                candidate.is_fixed = false;
                candidate.fixed_date = None;
            }
            Some(true) => candidate.is_fixed = true,
            None => {}
        }
        if let Some(note) = update.note {
            candidate.note = if note.is_empty() { None } else { Some(note) };
        }
        self.replace(candidate)
    }

    pub fn rename_node(&mut self, id: NodeId, name: &str) -> PlanResult<()> {
        self.update_node(
            id,
            NodeUpdate {
                name: Some(name.to_string()),
                ..NodeUpdate::default()
            },
        )
        .map(|_| ())
    }

    pub fn set_note(&mut self, id: NodeId, note: &str) -> PlanResult<()> {
        self.update_node(
            id,
            NodeUpdate {
                note: Some(note.to_string()),
                ..NodeUpdate::default()
            },
        )
        .map(|_| ())
    }

    pub fn set_duration(&mut self, id: NodeId, duration: i64) -> PlanResult<()> {
        self.update_node(
            id,
            NodeUpdate {
                duration: Some(duration),
                ..NodeUpdate::default()
            },
        )
        .map(|_| ())
    }

    /// Pin a milestone to `date`.
    pub fn set_fixed_date(&mut self, id: NodeId, date: NaiveDate) -> PlanResult<()> {
        self.update_node(
            id,
            NodeUpdate {
                fixed_date: Some(date),
                ..NodeUpdate::default()
            },
        )
        .map(|_| ())
    }

    pub fn clear_fixed_date(&mut self, id: NodeId) -> PlanResult<()> {
        self.update_node(
            id,
            NodeUpdate {
                is_fixed: Some(false),
                ..NodeUpdate::default()
            },
        )
        .map(|_| ())
    }

    /// Remove a node together with every link touching it.
    pub fn remove_node(&mut self, id: NodeId) -> PlanResult<Node> {
        let idx = self
            .nodes
            .iter()
            .position(|node| node.id == id)
            .ok_or(PlanError::NodeNotFound(id))?;
        let removed = self.nodes.remove(idx);
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        debug!(node = id, links = before - self.edges.len(), "removed node");
        self.refresh();
        Ok(removed)
    }

    /// Link `from` to `to`. Only one link per ordered pair is allowed.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        relation: RelationKind,
        delay: i64,
    ) -> PlanResult<EdgeId> {
        self.check_link(from, to, &self.edges)?;
        let id = self.edge_ids.next_id();
        self.edges
            .push(Edge::with_relation(id, from, to, relation, delay));
        self.refresh();
        Ok(id)
    }

    pub fn add_edge(&mut self, request: NewEdge) -> PlanResult<EdgeId> {
        self.connect(request.from, request.to, request.relation(), request.delay)
    }

    /// Nodes that `source` could still be linked to.
    pub fn available_targets(&self, source: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .map(|node| node.id)
            .filter(|&id| id != source)
            .filter(|&id| !self.edges.iter().any(|e| e.from == source && e.to == id))
            .collect()
    }

    pub fn set_link_delay(&mut self, id: EdgeId, delay: i64) -> PlanResult<()> {
        let edge = self
            .edges
            .iter_mut()
            .find(|edge| edge.id == id)
            .ok_or(PlanError::EdgeNotFound(id))?;
        edge.delay = delay;
        self.refresh();
        Ok(())
    }

    pub fn set_link_relation(&mut self, id: EdgeId, relation: RelationKind) -> PlanResult<()> {
        let edge = self
            .edges
            .iter_mut()
            .find(|edge| edge.id == id)
            .ok_or(PlanError::EdgeNotFound(id))?;
        (edge.from_type, edge.to_type) = relation.anchors();
        self.refresh();
        Ok(())
    }

    pub fn disconnect(&mut self, id: EdgeId) -> PlanResult<Edge> {
        let idx = self
            .edges
            .iter()
            .position(|edge| edge.id == id)
            .ok_or(PlanError::EdgeNotFound(id))?;
        let removed = self.edges.remove(idx);
        self.refresh();
        Ok(removed)
    }

    /// Recalculate the schedule from the current graph.
    pub fn refresh(&mut self) -> PlanSummary {
        let scheduler = Scheduler::new(self.calendar());
        let report = scheduler.analyze(&self.nodes, &self.edges);
        for diagnostic in &report.diagnostics {
            match diagnostic {
                Diagnostic::Cycle { .. } | Diagnostic::InfeasibleFloat { .. } => {
                    warn!(project = %self.metadata.project_name, "{diagnostic}")
                }
                _ => debug!(project = %self.metadata.project_name, "{diagnostic}"),
            }
        }
        self.nodes = report.nodes;
        self.project_end = report.project_end;
        self.diagnostics = report.diagnostics;
        self.summary()
    }

    pub fn summary(&self) -> PlanSummary {
        let critical_path = self.critical_path();
        PlanSummary {
            project_name: self.metadata.project_name.clone(),
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            critical_count: critical_path.len(),
            critical_path,
            project_duration: project_duration(&self.nodes),
            project_finish: self.calendar().date_for_day(self.project_end),
            diagnostics: self.diagnostics.clone(),
        }
    }

    fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    fn insert(&mut self, node: Node) -> PlanResult<NodeId> {
        validation::validate_node(&node)?;
        let id = self.node_ids.next_id();
        debug_assert_eq!(id, node.id);
        self.nodes.push(node);
        self.refresh();
        Ok(id)
    }

    fn replace(&mut self, candidate: Node) -> PlanResult<&Node> {
        validation::validate_node(&candidate)?;
        let idx = self
            .nodes
            .iter()
            .position(|node| node.id == candidate.id)
            .ok_or(PlanError::NodeNotFound(candidate.id))?;
        self.nodes[idx] = candidate;
        self.refresh();
        Ok(&self.nodes[idx])
    }

    fn check_link(&self, from: NodeId, to: NodeId, existing: &[Edge]) -> PlanResult<()> {
        if self.node(from).is_none() {
            return Err(PlanError::NodeNotFound(from));
        }
        if self.node(to).is_none() {
            return Err(PlanError::NodeNotFound(to));
        }
        if from == to {
            return Err(PlanError::SelfLink(from));
        }
        if existing.iter().any(|edge| edge.from == from && edge.to == to) {
            return Err(PlanError::DuplicateLink { from, to });
        }
        Ok(())
    }
}
