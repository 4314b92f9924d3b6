//! View-model builders.
//!
//! Turn raw service payloads into the exact structures the rendering
//! surfaces consume: the pie chart, the bar chart and the agent detail
//! panel. Everything here is pure; the page controllers decide when to call
//! these builders and what to do when a fetch fails.

use serde::Serialize;

use crate::api::{AgentPerformanceResult, Distribution};
use crate::display::{self, ForecastDisplay, TierDisplay};

/// Slice colors for the pie chart, assigned by position and cycled.
pub const PIE_PALETTE: [&str; 3] = [display::GREEN, display::ORANGE, display::RED];

/// Fixed bar chart categories, in render order.
pub const BAR_CATEGORIES: [&str; 2] = [display::NO_SALES_EXPECTED, display::SALES_EXPECTED];

/// Bar colors matching [`BAR_CATEGORIES`].
pub const BAR_PALETTE: [&str; 2] = [display::RED, display::GREEN];

/// Label of the bar chart's single dataset.
pub const BAR_DATASET_LABEL: &str = "Number of Agents";

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Performance tier distribution as pie chart data.
///
/// `categories`, `counts` and `colors` are parallel and always the same
/// length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PieModel {
    pub categories: Vec<String>,
    pub counts: Vec<u64>,
    pub colors: Vec<&'static str>,
}

impl PieModel {
    /// A pie with no slices, shown when the distribution could not be fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, n| acc.saturating_add(*n))
    }
}

/// Build the pie model in the distribution's own key order.
pub fn build_performance_pie_model(distribution: &Distribution) -> PieModel {
    let mut model = PieModel::empty();
    for (i, (category, count)) in distribution.iter().enumerate() {
        model.categories.push(category.to_string());
        model.counts.push(count);
        model.colors.push(PIE_PALETTE[i % PIE_PALETTE.len()]);
    }
    model
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

/// Prediction distribution as a two-bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarModel {
    pub label: &'static str,
    pub categories: [&'static str; 2],
    pub counts: [u64; 2],
    pub colors: [&'static str; 2],
}

impl BarModel {
    /// Both bars at zero.
    pub fn zeroed() -> Self {
        Self {
            label: BAR_DATASET_LABEL,
            categories: BAR_CATEGORIES,
            counts: [0, 0],
            colors: BAR_PALETTE,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, n| acc.saturating_add(*n))
    }
}

impl Default for BarModel {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Build the bar model from keys `"0"` and `"1"`.
///
/// Other keys are ignored and missing ones count as zero.
pub fn build_prediction_bar_model(distribution: &Distribution) -> BarModel {
    BarModel {
        counts: [
            distribution.get("0").unwrap_or(0),
            distribution.get("1").unwrap_or(0),
        ],
        ..BarModel::zeroed()
    }
}

// ---------------------------------------------------------------------------
// Agent detail
// ---------------------------------------------------------------------------

/// Everything the lookup page's result panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDetailModel {
    pub agent_code: String,
    pub forecast: ForecastDisplay,
    pub tier: TierDisplay,
    pub recommendations: Vec<String>,
}

pub fn build_agent_detail_model(result: &AgentPerformanceResult) -> AgentDetailModel {
    AgentDetailModel {
        agent_code: result.agent_code.clone(),
        forecast: display::forecast(result.prediction),
        tier: TierDisplay::derive(&result.performance_level),
        recommendations: result.recommendations.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
