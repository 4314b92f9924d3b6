//! JSON API handlers for the web dashboard.
//!
//! Every handler builds a fresh page controller, drives it to a settled
//! state and returns its snapshot. Service failures are already page state
//! by then, so they come back as `200` responses; only serialization
//! problems surface as errors.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use super::{Dashboard, content_type_json};
use crate::pages::{DistributionPage, LookupPage};

/// Health API response.
#[derive(Serialize)]
struct HealthResponse<'a> {
    service_url: &'a str,
    service_reachable: bool,
    config_exists: bool,
    log_exists: bool,
}

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// `GET /api/lookup/{agentId}` — lookup page snapshot.
pub fn get_lookup(dashboard: &Dashboard, agent_id: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let mut page = LookupPage::new(dashboard.log.clone());
    page.lookup(&dashboard.client, agent_id);
    json_response(&page.snapshot())
}

/// `GET /api/distribution` — distribution page snapshot.
pub fn get_distribution(dashboard: &Dashboard) -> Result<Response<Cursor<Vec<u8>>>> {
    let mut page = DistributionPage::new(dashboard.log.clone());
    page.mount(&dashboard.client);
    json_response(&page.snapshot())
}

/// `GET /api/health` — service and local file status.
pub fn get_health(dashboard: &Dashboard) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = HealthResponse {
        service_url: dashboard.client.base_url(),
        service_reachable: dashboard.client.is_reachable(),
        config_exists: dashboard.config_exists,
        log_exists: dashboard.log.exists(),
    };
    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
