//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `salesboard lookup <AGENT_ID>` — one agent's forecast, tier, recommendations
//! - `salesboard distribution` — tier pie legend and forecast bar chart
//! - `salesboard shell` — interactive lookup loop
//! - `salesboard history` — recent lookups from the event log
//! - `salesboard health` — config, service reachability, event log
//! - `salesboard config show|init|set|reset` — configuration management

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use crate::api::ServiceClient;
use crate::config;
use crate::display::Trend;
use crate::events::{Event, EventEntry, EventLog};
use crate::pages::{DistributionPage, DistributionView, FetchState, LookupPage};
use crate::view_model::AgentDetailModel;

/// Output format for page commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Width of the longest bar in the forecast chart.
const BAR_WIDTH: usize = 40;

// ---------------------------------------------------------------------------
// salesboard lookup
// ---------------------------------------------------------------------------

/// Look up one agent and print the result panel or the error line.
pub fn run_lookup(agent_id: &str, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let client = ServiceClient::from_config(&cfg.service);
    let mut page = LookupPage::new(EventLog::from_config(&cfg.logging));

    page.lookup(&client, agent_id);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
        }
        OutputFormat::Table => print!("{}", render_lookup(&page)),
    }
    Ok(())
}

/// Render the lookup page state as terminal text.
pub fn render_lookup(page: &LookupPage) -> String {
    match page.state() {
        FetchState::Idle => String::new(),
        FetchState::Loading => format!("{}\n", "Loading...".dimmed()),
        FetchState::Failure(message) => format!("{}\n", message.red().bold()),
        FetchState::Success(lookup) => render_detail(&lookup.detail),
    }
}

/// Render the agent detail panel.
pub fn render_detail(detail: &AgentDetailModel) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "Agent".bold().cyan(),
        detail.agent_code.bold()
    ));
    out.push_str(&format!("{}\n", "=".repeat(50)));

    // Forecast
    let forecast = &detail.forecast;
    let arrow = match forecast.trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
    };
    out.push_str(&format!(
        "  {} {}\n",
        "Sales Forecast:   ".bold(),
        paint(&format!("{arrow} {}", forecast.label), forecast.primary_color).bold()
    ));
    out.push_str(&format!("  {:<19}{}\n", "", forecast.caption.dimmed()));

    // Tier
    let tier = &detail.tier;
    out.push_str(&format!(
        "  {} {} {}\n",
        "Performance Level:".bold(),
        render_stars(tier.star_count, tier.max_stars, tier.primary_color),
        paint(&tier.name, tier.primary_color).bold()
    ));
    out.push('\n');

    // Recommendations
    out.push_str(&format!("{}\n", "Recommendations".bold().cyan()));
    if detail.recommendations.is_empty() {
        out.push_str(&format!("  {}\n", "none".dimmed()));
    }
    for (i, rec) in detail.recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, rec));
    }

    out
}

/// `filled` solid stars followed by outlined ones, `max` in total.
fn render_stars(filled: u8, max: u8, color: &str) -> String {
    let filled = filled.min(max);
    let solid = "★".repeat(filled as usize);
    let hollow = "☆".repeat((max - filled) as usize);
    format!("{}{}", paint(&solid, color), paint(&hollow, color).dimmed())
}

// ---------------------------------------------------------------------------
// salesboard distribution
// ---------------------------------------------------------------------------

/// Fetch both distributions and print the two charts.
pub fn run_distribution(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let client = ServiceClient::from_config(&cfg.service);
    let mut page = DistributionPage::new(EventLog::from_config(&cfg.logging));

    page.mount(&client);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
        }
        OutputFormat::Table => print!("{}", render_distribution(page.view())),
    }
    Ok(())
}

/// Render the pie legend and the bar chart. Degraded halves show as zeros
/// with no error text.
pub fn render_distribution(view: &DistributionView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Performance Level Distribution".bold().cyan()));
    out.push_str(&format!("{}\n", "=".repeat(50)));
    let pie = &view.pie;
    let total = pie.total();
    if pie.categories.is_empty() {
        out.push_str(&format!("  {}\n", "no data".dimmed()));
    }
    for ((category, count), color) in pie.categories.iter().zip(&pie.counts).zip(&pie.colors) {
        out.push_str(&format!(
            "  {} {:<16} {:>6} {:>6.1}%\n",
            paint("●", color),
            category,
            count,
            pct(*count, total),
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", "Sales Forecast Overview".bold().cyan()));
    out.push_str(&format!("{}\n", "=".repeat(50)));
    let bar = &view.bar;
    let max = bar.counts.iter().copied().max().unwrap_or(0);
    for ((category, count), color) in bar.categories.iter().zip(bar.counts).zip(bar.colors) {
        let width = bar_width(count, max);
        out.push_str(&format!(
            "  {:<18} {} {}\n",
            category,
            paint(&"█".repeat(width), color),
            count
        ));
    }
    out.push_str(&format!("  {}\n", bar.label.dimmed()));

    out
}

/// Bar length in cells, scaled so `max` fills [`BAR_WIDTH`].
fn bar_width(count: u64, max: u64) -> usize {
    if max == 0 {
        return 0;
    }
    (u128::from(count) * BAR_WIDTH as u128).div_ceil(u128::from(max)) as usize
}

fn pct(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

// ---------------------------------------------------------------------------
// salesboard shell
// ---------------------------------------------------------------------------

/// Read agent identifiers from stdin, one lookup per line, until EOF or
/// `quit`.
pub fn run_shell() -> Result<()> {
    let cfg = config::load();
    let client = ServiceClient::from_config(&cfg.service);
    let mut page = LookupPage::new(EventLog::from_config(&cfg.logging));

    println!("{}", "Agent Performance Lookup".bold().cyan());
    println!("{}", "Enter an agent ID, or `quit` to exit.".dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "agent>".bold());
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read from stdin")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        page.lookup(&client, &line);
        println!("{}", render_lookup(&page));
    }

    page.unmount();
    Ok(())
}

// ---------------------------------------------------------------------------
// salesboard history
// ---------------------------------------------------------------------------

/// Show the most recent lookups recorded in the event log.
pub fn run_history(limit: usize, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let log = EventLog::from_config(&cfg.logging);
    let entries = log.recent_lookups(limit);

    if entries.is_empty() {
        println!("{}", "No lookups recorded yet.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => print!("{}", render_history(&entries)),
    }
    Ok(())
}

fn render_history(entries: &[EventEntry]) -> String {
    let mut out = format!("{}\n", "Recent Lookups".bold().cyan());
    out.push_str(&format!(
        "  {:<20} {:<14} {:<10} {:<8} {:>8}\n",
        "Time", "Agent", "Outcome", "Tier", "Latency"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(64)));

    for entry in entries {
        let Event::Lookup {
            agent_id,
            outcome,
            tier,
            latency_ms,
            ..
        } = &entry.event
        else {
            continue;
        };
        let time = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| entry.timestamp.clone());
        let outcome_cell = format!("{outcome:<10}");
        let outcome_cell = if outcome == "success" {
            outcome_cell.green()
        } else {
            outcome_cell.red()
        };
        out.push_str(&format!(
            "  {:<20} {:<14} {} {:<8} {:>6}ms\n",
            time,
            truncate(agent_id, 14),
            outcome_cell,
            tier.as_deref().unwrap_or("-"),
            latency_ms
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// salesboard health
// ---------------------------------------------------------------------------

/// Check config files, service reachability and the event log.
pub fn run_health() -> Result<()> {
    println!("{}", "Salesboard Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.salesboard/config.toml found"
        } else {
            "not found (run `salesboard config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".salesboard.toml found"
        } else {
            "none (optional)"
        },
    );

    let client = ServiceClient::from_config(&cfg.service);
    let reachable = client.is_reachable();
    print_health_item(
        "Prediction service",
        reachable,
        &if reachable {
            format!("reachable at {}", client.base_url())
        } else {
            format!("not reachable at {}", client.base_url())
        },
    );

    let log = EventLog::from_config(&cfg.logging);
    let detail = match (cfg.logging.enabled, log.exists()) {
        (false, _) => "disabled".to_string(),
        (true, true) => format!("{} entries", log.read_all().len()),
        (true, false) => "no log file yet".to_string(),
    };
    print_health_item("Event log", log.exists(), &detail);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// salesboard config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Salesboard Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.salesboard/config.toml", global_exists);
    print_source(".salesboard.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "SALESBOARD_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.salesboard/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Color text with a `#rrggbb` palette token. Unparseable tokens leave the
/// text uncolored.
fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AgentPerformanceResult, ApiError};
    use crate::pages::DistributionKind;
    use crate::view_model::{BarModel, PieModel};

    fn strip(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\x1b') => in_escape = true,
                (true, 'm') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn hex_rgb_parses_palette_tokens() {
        assert_eq!(hex_rgb("#4caf50"), Some((0x4c, 0xaf, 0x50)));
        assert_eq!(hex_rgb("4caf50"), None);
        assert_eq!(hex_rgb("#zzzzzz"), None);
        assert_eq!(hex_rgb("#fff"), None);
    }

    #[test]
    fn stars_fill_and_outline() {
        let stars = strip(&render_stars(2, 3, "#ff9800"));
        assert_eq!(stars, "★★☆");
        assert_eq!(strip(&render_stars(0, 3, "#4caf50")), "☆☆☆");
    }

    #[test]
    fn lookup_success_panel() {
        let mut page = LookupPage::default();
        let t = page.submit("A1");
        page.resolve(
            t,
            Ok(AgentPerformanceResult {
                agent_code: "A1".to_string(),
                prediction: 1,
                performance_level: "High".to_string(),
                recommendations: vec!["Upsell product X".to_string()],
            }),
        );
        let text = strip(&render_lookup(&page));
        assert!(text.contains("▲ Sales Expected"));
        assert!(text.contains("★★★ High"));
        assert!(text.contains("1. Upsell product X"));
    }

    #[test]
    fn lookup_failure_line() {
        let mut page = LookupPage::default();
        let t = page.submit("ZZZ");
        page.resolve(t, Err(ApiError::NotFound));
        assert_eq!(strip(&render_lookup(&page)), "Agent not found\n");
    }

    #[test]
    fn distribution_with_degraded_bar() {
        let view = DistributionView {
            pie: PieModel {
                categories: vec!["High".into(), "Medium".into(), "Low".into()],
                counts: vec![3, 1, 2],
                colors: vec!["#4caf50", "#ff9800", "#f44336"],
            },
            bar: BarModel::zeroed(),
            degraded: vec![DistributionKind::Prediction],
        };
        let text = strip(&render_distribution(&view));
        assert!(text.contains("High"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("No Sales Expected"));
        assert!(!text.to_lowercase().contains("error"));
        assert!(!text.to_lowercase().contains("failed"));
    }

    #[test]
    fn bar_widths_scale_to_max() {
        let view = DistributionView {
            bar: BarModel {
                counts: [10, 5],
                ..BarModel::zeroed()
            },
            ..DistributionView::default()
        };
        let text = strip(&render_distribution(&view));
        assert!(text.contains(&"█".repeat(BAR_WIDTH)));
        assert!(text.contains(&format!("{} 5", "█".repeat(BAR_WIDTH / 2))));
    }

    #[test]
    fn bar_width_handles_counts_near_u64_max() {
        assert_eq!(bar_width(u64::MAX, u64::MAX), BAR_WIDTH);
        assert_eq!(bar_width(u64::MAX / 2, u64::MAX), BAR_WIDTH / 2);
        assert_eq!(bar_width(1, u64::MAX), 1);
        assert_eq!(bar_width(0, 0), 0);

        let view = DistributionView {
            bar: BarModel {
                counts: [u64::MAX, 0],
                ..BarModel::zeroed()
            },
            ..DistributionView::default()
        };
        let text = strip(&render_distribution(&view));
        assert!(text.contains(&"█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn truncate_long_ids() {
        assert_eq!(truncate("short", 14), "short");
        assert_eq!(truncate("abcdefghijklmnopqrstuvwxyz", 5), "abcd…");
    }
}
