/// Configuration schema and defaults for salesboard.
///
/// Defines the TOML-serializable configuration with three sections:
/// `[service]`, `[web]` and `[logging]`. Every field has a built-in default;
/// users only set the values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Maps directly to `~/.salesboard/config.toml` and `.salesboard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesboardConfig {
    pub service: ServiceConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [service]
// ---------------------------------------------------------------------------

/// Where the prediction service lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP base URL, without a trailing path.
    pub base_url: String,
    /// Per-request timeout in milliseconds. `0` keeps the transport default.
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `salesboard web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Event log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether events are appended to the log file.
    pub enabled: bool,
    /// Path to the JSONL event log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.salesboard/events.jsonl".to_string(),
        }
    }
}

impl SalesboardConfig {
    /// Annotated default config written by `salesboard config init`.
    pub fn default_toml() -> String {
        r#"# salesboard configuration
#
# Precedence (highest last): built-in defaults, this file,
# ./.salesboard.toml, SALESBOARD_* environment variables.

[service]
# Base URL of the prediction service.
base_url = "http://localhost:8000"
# Request timeout in milliseconds (0 = transport default).
timeout_ms = 0

[web]
# Listen address for `salesboard web`.
addr = "127.0.0.1:3000"
open_browser = true

[logging]
# JSONL event log of lookups and distribution fetches.
enabled = true
path = "~/.salesboard/events.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
