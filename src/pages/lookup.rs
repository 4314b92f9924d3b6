//! Lookup page: one agent's forecast, tier and recommendations.

use std::time::Instant;

use serde::Serialize;

use super::FetchState;
use crate::api::{AgentPerformanceResult, ApiError, PerformanceApi};
use crate::events::{Event, EventLog};
use crate::view_model::{AgentDetailModel, build_agent_detail_model};

/// The single inline error the lookup page shows for any failed lookup.
///
/// A 404 and an unreachable service read the same to the user; the event
/// log keeps the distinction.
pub const LOOKUP_ERROR_MESSAGE: &str = "Agent not found";

/// A settled successful lookup: the raw result and its panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentLookup {
    pub result: AgentPerformanceResult,
    pub detail: AgentDetailModel,
}

/// Handle for one submitted lookup.
///
/// Only the ticket of the most recent submit can commit a result.
#[derive(Debug)]
pub struct LookupTicket {
    generation: u64,
    agent_id: String,
    started: Instant,
}

impl LookupTicket {
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// JSON view of the page for the web dashboard.
#[derive(Debug, Serialize)]
pub struct LookupSnapshot<'a> {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'a AgentDetailModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct LookupPage {
    state: FetchState<AgentLookup>,
    generation: u64,
    log: EventLog,
}

impl LookupPage {
    pub fn new(log: EventLog) -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            log,
        }
    }

    pub fn state(&self) -> &FetchState<AgentLookup> {
        &self.state
    }

    /// The detail panel, if the last lookup succeeded.
    pub fn detail(&self) -> Option<&AgentDetailModel> {
        self.state.success().map(|lookup| &lookup.detail)
    }

    pub fn error(&self) -> Option<&str> {
        self.state.failure()
    }

    pub fn snapshot(&self) -> LookupSnapshot<'_> {
        LookupSnapshot {
            state: self.state.name(),
            detail: self.detail(),
            error: self.error(),
        }
    }

    /// Start a lookup from any state.
    ///
    /// Moves to `Loading`, drops the previous result or error and
    /// invalidates every earlier ticket.
    pub fn submit(&mut self, agent_id: &str) -> LookupTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        LookupTicket {
            generation: self.generation,
            agent_id: agent_id.to_string(),
            started: Instant::now(),
        }
    }

    /// Commit the outcome of a submitted lookup.
    ///
    /// Returns `false` and leaves the page untouched when the ticket is stale.
    pub fn resolve(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<AgentPerformanceResult, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let latency_ms = ticket.started.elapsed().as_millis() as u64;
        match outcome {
            Ok(result) => {
                self.log.record(Event::Lookup {
                    agent_id: ticket.agent_id,
                    outcome: "success".to_string(),
                    tier: Some(result.performance_level.clone()),
                    prediction: Some(result.prediction),
                    latency_ms,
                });
                let detail = build_agent_detail_model(&result);
                self.state = FetchState::Success(AgentLookup { result, detail });
            }
            Err(err) => {
                self.log.record(Event::Lookup {
                    agent_id: ticket.agent_id,
                    outcome: err.kind().to_string(),
                    tier: None,
                    prediction: None,
                    latency_ms,
                });
                self.state = FetchState::Failure(LOOKUP_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Submit, fetch and resolve in one call.
    pub fn lookup<A: PerformanceApi>(
        &mut self,
        api: &A,
        agent_id: &str,
    ) -> &FetchState<AgentLookup> {
        let ticket = self.submit(agent_id);
        let outcome = api.fetch_agent_performance(ticket.agent_id());
        self.resolve(ticket, outcome);
        &self.state
    }

    /// Leave the page: back to `Idle`, in-flight tickets become stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
