/// Blocking HTTP client for the prediction service.
///
/// Uses the synchronous `ureq` agent. One request per call, no retry. A
/// request timeout is only set when `service.timeout_ms` is non-zero;
/// otherwise the transport defaults apply and a hung service blocks the
/// caller.
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::types::{
    AgentPerformanceResult, Distribution, PerformanceDistributionBody, PredictionDistributionBody,
};
use super::{ApiError, PerformanceApi};
use crate::config::schema::ServiceConfig;

#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl ServiceClient {
    /// Build a client from the resolved `[service]` config section.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        let mut builder = ureq::AgentBuilder::new();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent: builder.build(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the service answers the distribution endpoint with a 2xx.
    ///
    /// Uses a short 5 s timeout so `salesboard health` never stalls.
    pub fn is_reachable(&self) -> bool {
        let url = format!("{}/performance-distribution", self.base_url);
        self.agent
            .get(&url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }

    /// URL of the single-agent endpoint for `agent_id`.
    ///
    /// The identifier is not trimmed or validated; everything outside the
    /// RFC 3986 unreserved set is percent-encoded so the service sees what
    /// the user typed, including `""`.
    pub fn performance_url(&self, agent_id: &str) -> String {
        format!(
            "{}/performance/{}",
            self.base_url,
            urlencoding::encode(agent_id)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut request = self.agent.get(url);
        if let Some(t) = self.timeout {
            request = request.timeout(t);
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(404, _) => ApiError::NotFound,
            ureq::Error::Status(code, _) => ApiError::Status(code),
            ureq::Error::Transport(t) => ApiError::Transport(t.to_string()),
        })?;

        response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl PerformanceApi for ServiceClient {
    fn fetch_agent_performance(&self, agent_id: &str) -> Result<AgentPerformanceResult, ApiError> {
        self.get_json(&self.performance_url(agent_id))
    }

    fn fetch_performance_distribution(&self) -> Result<Distribution, ApiError> {
        let url = format!("{}/performance-distribution", self.base_url);
        let body: PerformanceDistributionBody = self.get_json(&url)?;
        Ok(body.performance_distribution)
    }

    fn fetch_prediction_distribution(&self) -> Result<Distribution, ApiError> {
        let url = format!("{}/prediction-distribution", self.base_url);
        let body: PredictionDistributionBody = self.get_json(&url)?;
        Ok(body.prediction_distribution)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let client = ServiceClient::from_config(&ServiceConfig::default());
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.timeout, None);
    }

    #[test]
    fn client_strips_trailing_slash_and_sets_timeout() {
        let config = ServiceConfig {
            base_url: "http://svc:8000/".to_string(),
            timeout_ms: 1500,
        };
        let client = ServiceClient::from_config(&config);
        assert_eq!(client.base_url(), "http://svc:8000");
        assert_eq!(client.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn performance_url_keeps_identifier() {
        let client = ServiceClient::from_config(&ServiceConfig::default());
        assert_eq!(
            client.performance_url("A1"),
            "http://localhost:8000/performance/A1"
        );
        assert_eq!(
            client.performance_url(""),
            "http://localhost:8000/performance/"
        );
    }

    #[test]
    fn performance_url_encodes_reserved_bytes() {
        let client = ServiceClient::from_config(&ServiceConfig::default());
        let base = "http://localhost:8000/performance/";
        assert_eq!(client.performance_url("AGT-001_x.y~"), format!("{base}AGT-001_x.y~"));
        assert_eq!(client.performance_url("a b/c"), format!("{base}a%20b%2Fc"));
        assert_eq!(client.performance_url("é"), format!("{base}%C3%A9"));
        assert_eq!(client.performance_url("?#%"), format!("{base}%3F%23%25"));
    }
}
