//! Client side of the prediction service API.
//!
//! The service exposes three read-only JSON endpoints:
//!
//! - `GET /performance/{agentId}` — one agent's forecast, tier and recommendations
//! - `GET /performance-distribution` — agent counts per performance tier
//! - `GET /prediction-distribution` — agent counts per binary forecast
//!
//! [`PerformanceApi`] is the seam page controllers depend on; [`ServiceClient`]
//! is the blocking `ureq` implementation used by the CLI and web dashboard.

pub mod client;
pub mod types;

use thiserror::Error;

pub use client::ServiceClient;
pub use types::{AgentPerformanceResult, Distribution, UNKNOWN_PREDICTION};

/// Failure of a single service call.
///
/// Kept typed so logs can tell a missing agent apart from a dead service,
/// even though the lookup page shows one message for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("agent not found")]
    NotFound,
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short stable name used in the event log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Status(_) => "status",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

/// The three calls the dashboard makes against the prediction service.
///
/// Each method performs exactly one request: no retry, no caching.
pub trait PerformanceApi {
    fn fetch_agent_performance(&self, agent_id: &str) -> Result<AgentPerformanceResult, ApiError>;

    fn fetch_performance_distribution(&self) -> Result<Distribution, ApiError>;

    fn fetch_prediction_distribution(&self) -> Result<Distribution, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinct() {
        let kinds = [
            ApiError::NotFound.kind(),
            ApiError::Status(500).kind(),
            ApiError::Transport("refused".into()).kind(),
            ApiError::Decode("eof".into()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(ApiError::Status(503).to_string(), "service returned HTTP 503");
    }
}
