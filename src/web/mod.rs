//! Embedded web dashboard.
//!
//! A lightweight synchronous HTTP server (`tiny_http`) that serves:
//! - The single-page dashboard (lookup page and distribution page)
//! - JSON endpoints returning page snapshots built by the page controllers
//!
//! Launched via `salesboard web` (default: `http://127.0.0.1:3000`).

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::ServiceClient;
use crate::config::SalesboardConfig;
use crate::events::EventLog;

/// Shared, read-only context for request handlers.
pub struct Dashboard {
    client: ServiceClient,
    log: EventLog,
    config_exists: bool,
}

impl Dashboard {
    pub fn from_config(config: &SalesboardConfig) -> Self {
        Self {
            client: ServiceClient::from_config(&config.service),
            log: EventLog::from_config(&config.logging),
            config_exists: crate::config::global_config_file()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on `addr`.
///
/// Blocks the current thread and handles requests one at a time. A failing
/// handler produces a 500 for that request only.
pub fn serve(config: &SalesboardConfig, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;
    let dashboard = Dashboard::from_config(config);

    println!("salesboard dashboard running at http://{addr}");
    println!("prediction service: {}", dashboard.client.base_url());
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = match dispatch(&dashboard, &method, &url) {
            Ok(resp) => resp,
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500))
            }
        };
        let status = response.status_code().0;
        let _ = request.respond(response);

        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    dashboard: &Dashboard,
    method: &Method,
    url: &str,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);

    if *method == Method::Get
        && let Some(raw_id) = path.strip_prefix("/api/lookup/")
    {
        let agent_id = urlencoding::decode(raw_id).context("agent id is not valid UTF-8")?;
        return api::get_lookup(dashboard, &agent_id);
    }

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),
        (&Method::Get, "/api/distribution") => api::get_distribution(dashboard),
        (&Method::Get, "/api/health") => api::get_health(dashboard),
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
