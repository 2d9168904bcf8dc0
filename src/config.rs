//! Process configuration for the bundled binaries.

use chrono::NaiveDate;
use std::net::SocketAddr;

use crate::errors::ConfigError;
use crate::logging::LOG_ENV;
use crate::metadata::PlanMetadata;

pub const ADDR_ENV: &str = "NETWORK_PLAN_HTTP_ADDR";
pub const EPOCH_ENV: &str = "NETWORK_PLAN_EPOCH";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub log_filter: Option<String>,
    pub planning_epoch: Option<NaiveDate>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset and blank values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = value(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let listen_addr = addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::Address {
                value: addr.clone(),
                source,
            })?;

        let planning_epoch = match value(EPOCH_ENV) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::Epoch { value: raw, source })?,
            ),
            None => None,
        };

        Ok(Self {
            listen_addr,
            log_filter: value(LOG_ENV),
            planning_epoch,
        })
    }

    /// Metadata for a fresh plan, honouring a configured epoch.
    pub fn initial_metadata(&self) -> PlanMetadata {
        let mut metadata = PlanMetadata::default();
        if let Some(epoch) = self.planning_epoch {
            metadata.planning_epoch = epoch;
        }
        metadata
    }
}
