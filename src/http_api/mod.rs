use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Edge, EdgeId, NetworkPlan, NewEdge, NewNode, Node, NodeId, NodeUpdate, PlanError,
    PlanMetadata, PlanSummary, ProjectCalendar, RelationDescriptor, ScheduleReport, Scheduler,
    relation_kinds,
};

/// Shared plan behind a single-writer lock; every write handler recalculates
/// while holding it.
#[derive(Clone)]
pub struct AppState {
    plan: Arc<RwLock<NetworkPlan>>,
}

impl AppState {
    pub fn new(plan: NetworkPlan) -> Self {
        Self {
            plan: Arc::new(RwLock::new(plan)),
        }
    }

    pub fn with_shared(plan: Arc<RwLock<NetworkPlan>>) -> Self {
        Self { plan }
    }

    fn plan(&self) -> Arc<RwLock<NetworkPlan>> {
        self.plan.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        let message = value.to_string();
        match value {
            PlanError::NodeNotFound(_) | PlanError::EdgeNotFound(_) => ApiError::NotFound(message),
            PlanError::SelfLink(_) | PlanError::DuplicateLink { .. } => ApiError::Conflict(message),
            PlanError::Invalid(_) => ApiError::Invalid(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

/// Body of the stateless `/schedule` endpoint.
#[derive(Debug, Deserialize)]
struct ScheduleRequest {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    planning_epoch: Option<NaiveDate>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/relation-kinds", get(list_relation_kinds))
        .route("/schedule", post(schedule_snapshot))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/summary", get(summary))
        .route("/nodes", get(list_nodes).post(create_node))
        .route(
            "/nodes/:id",
            get(get_node).put(update_node).delete(delete_node),
        )
        .route("/edges", get(list_edges).post(create_edge))
        .route("/edges/:id", delete(delete_edge))
        .route("/critical-path", get(critical_path))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, plan: NetworkPlan) -> std::io::Result<()> {
    let state = AppState::new(plan);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "network plan HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_relation_kinds() -> Json<&'static [RelationDescriptor]> {
    Json(relation_kinds())
}

async fn schedule_snapshot(Json(request): Json<ScheduleRequest>) -> Json<ScheduleReport> {
    let scheduler = match request.planning_epoch {
        Some(epoch) => Scheduler::new(ProjectCalendar::new(epoch)),
        None => Scheduler::default(),
    };
    Json(scheduler.analyze(&request.nodes, &request.edges))
}

async fn get_metadata(State(state): State<AppState>) -> Json<PlanMetadata> {
    let plan = state.plan();
    let metadata = plan.read().metadata().clone();
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<PlanMetadata>,
) -> Json<PlanMetadata> {
    let plan = state.plan();
    let current = {
        let mut guard = plan.write();
        guard.set_metadata(metadata);
        guard.metadata().clone()
    };
    Json(current)
}

async fn summary(State(state): State<AppState>) -> Json<PlanSummary> {
    let plan = state.plan();
    let summary = plan.read().summary();
    Json(summary)
}

async fn list_nodes(State(state): State<AppState>) -> Json<Vec<Node>> {
    let plan = state.plan();
    let nodes = plan.read().nodes().to_vec();
    Json(nodes)
}

async fn get_node(
    State(state): State<AppState>,
    Path(node_id): Path<NodeId>,
) -> Result<Json<Node>, ApiError> {
    let plan = state.plan();
    let guard = plan.read();
    guard
        .node(node_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| PlanError::NodeNotFound(node_id).into())
}

async fn create_node(
    State(state): State<AppState>,
    Json(request): Json<NewNode>,
) -> Result<(StatusCode, Json<Node>), ApiError> {
    let plan = state.plan();
    let created = {
        let mut guard = plan.write();
        let id = guard.add_node(request)?;
        guard.node(id).cloned().ok_or(PlanError::NodeNotFound(id))?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_node(
    State(state): State<AppState>,
    Path(node_id): Path<NodeId>,
    Json(update): Json<NodeUpdate>,
) -> Result<Json<Node>, ApiError> {
    let plan = state.plan();
    let updated = {
        let mut guard = plan.write();
        guard.update_node(node_id, update)?.clone()
    };
    Ok(Json(updated))
}

async fn delete_node(
    State(state): State<AppState>,
    Path(node_id): Path<NodeId>,
) -> Result<StatusCode, ApiError> {
    let plan = state.plan();
    plan.write().remove_node(node_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_edges(State(state): State<AppState>) -> Json<Vec<Edge>> {
    let plan = state.plan();
    let edges = plan.read().edges().to_vec();
    Json(edges)
}

async fn create_edge(
    State(state): State<AppState>,
    Json(request): Json<NewEdge>,
) -> Result<(StatusCode, Json<Edge>), ApiError> {
    let plan = state.plan();
    let created = {
        let mut guard = plan.write();
        let id = guard.add_edge(request)?;
        guard.edge(id).cloned().ok_or(PlanError::EdgeNotFound(id))?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_edge(
    State(state): State<AppState>,
    Path(edge_id): Path<EdgeId>,
) -> Result<StatusCode, ApiError> {
    let plan = state.plan();
    plan.write().disconnect(edge_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn critical_path(State(state): State<AppState>) -> Json<Vec<NodeId>> {
    let plan = state.plan();
    let ids = plan.read().critical_path();
    Json(ids)
}
