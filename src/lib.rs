pub mod calculations;
pub mod calendar;
pub mod config;
pub mod edge;
pub mod errors;
pub mod graph;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod metadata;
pub mod node;
pub mod plan;
pub mod relation;
pub mod schedule;
pub mod table;
pub mod validation;

pub use calculations::critical_path::{critical_path_ids, project_duration};
pub use calendar::ProjectCalendar;
pub use config::ServiceConfig;
pub use edge::{Anchor, Edge, EdgeId};
pub use errors::{ConfigError, PlanError, PlanResult, ValidationError};
pub use metadata::PlanMetadata;
pub use node::{Node, NodeId, NodeKind};
pub use plan::{NetworkPlan, NewEdge, NewNode, NodeUpdate, PlanSummary};
pub use relation::{RelationDescriptor, RelationKind, relation_kinds};
pub use schedule::{Diagnostic, ScheduleReport, Scheduler, analyze, recalculate};
