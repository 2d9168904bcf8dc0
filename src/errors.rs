//! Crate-wide error types.

use thiserror::Error;

use crate::edge::EdgeId;
use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("node {0} cannot be linked to itself")]
    SelfLink(NodeId),

    #[error("node {from} is already linked to node {to}")]
    DuplicateLink { from: NodeId, to: NodeId },

    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),
}

/// Rejection raised by the plan store before a node enters the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid listen address '{value}': {source}")]
    Address {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid planning epoch '{value}' (expected YYYY-MM-DD): {source}")]
    Epoch {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
