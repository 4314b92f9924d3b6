//! Presentation-derivation rules.
//!
//! Pure, total functions that turn a performance tier or a binary prediction
//! into the attributes a rendering surface needs: star count, palette colors,
//! forecast label and trend direction.
//!
//! Tier matching is case-insensitive. Every function has an explicit default
//! branch for values outside the recognized domain:
//!
//! | Tier          | Stars | Primary   | Background |
//! |---------------|-------|-----------|------------|
//! | high          | 3     | `#4caf50` | `#e8f5e9`  |
//! | medium        | 2     | `#ff9800` | `#fff3e0`  |
//! | low           | 1     | `#f44336` | `#ffebee`  |
//! | anything else | 0     | `#4caf50` | `#e8f5e9`  |
//!
//! The unrecognized row reuses the green pair on purpose: an unknown tier is
//! shown with no stars but the neutral "high" palette.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const GREEN: &str = "#4caf50";
pub const GREEN_BG: &str = "#e8f5e9";
pub const ORANGE: &str = "#ff9800";
pub const ORANGE_BG: &str = "#fff3e0";
pub const RED: &str = "#f44336";
pub const RED_BG: &str = "#ffebee";

/// Maximum number of stars in a tier rating.
pub const MAX_STARS: u8 = 3;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// A recognized performance tier, or `Unrecognized` for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
    Unrecognized,
}

impl Tier {
    /// Classify a raw tier string, ignoring letter case.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unrecognized,
        }
    }

    pub fn star_count(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Unrecognized => 0,
        }
    }

    pub fn primary_color(self) -> &'static str {
        match self {
            Self::High => GREEN,
            Self::Medium => ORANGE,
            Self::Low => RED,
            Self::Unrecognized => GREEN,
        }
    }

    pub fn background_color(self) -> &'static str {
        match self {
            Self::High => GREEN_BG,
            Self::Medium => ORANGE_BG,
            Self::Low => RED_BG,
            Self::Unrecognized => GREEN_BG,
        }
    }
}

/// Number of filled stars for a tier (0–3).
pub fn star_count(tier: &str) -> u8 {
    Tier::parse(tier).star_count()
}

/// Primary color token for a tier.
pub fn tier_color(tier: &str) -> &'static str {
    Tier::parse(tier).primary_color()
}

/// Background color token for a tier.
pub fn tier_background_color(tier: &str) -> &'static str {
    Tier::parse(tier).background_color()
}

/// Display attributes for one tier value.
///
/// `name` is the tier string exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierDisplay {
    pub name: String,
    pub tier: Tier,
    pub star_count: u8,
    pub max_stars: u8,
    pub primary_color: &'static str,
    pub background_color: &'static str,
}

impl TierDisplay {
    pub fn derive(raw: &str) -> Self {
        let tier = Tier::parse(raw);
        Self {
            name: raw.to_string(),
            tier,
            star_count: tier.star_count(),
            max_stars: MAX_STARS,
            primary_color: tier.primary_color(),
            background_color: tier.background_color(),
        }
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

pub const SALES_EXPECTED: &str = "Sales Expected";
pub const NO_SALES_EXPECTED: &str = "No Sales Expected";

/// Direction of the forecast trend icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Display attributes for a binary prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDisplay {
    pub label: &'static str,
    pub trend: Trend,
    pub caption: &'static str,
    pub primary_color: &'static str,
    pub background_color: &'static str,
}

/// Derive the forecast display for a prediction value.
///
/// Only `1` means sales are expected; `0` and every other value fall into
/// the "No Sales Expected" branch.
pub fn forecast(prediction: i64) -> ForecastDisplay {
    match prediction {
        1 => ForecastDisplay {
            label: SALES_EXPECTED,
            trend: Trend::Up,
            caption: "High probability of sales in the upcoming month",
            primary_color: GREEN,
            background_color: GREEN_BG,
        },
        _ => ForecastDisplay {
            label: NO_SALES_EXPECTED,
            trend: Trend::Down,
            caption: "Low probability of sales in the upcoming month",
            primary_color: RED,
            background_color: RED_BG,
        },
    }
}

/// Forecast label for a prediction value.
pub fn forecast_label(prediction: i64) -> &'static str {
    forecast(prediction).label
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_count_ignores_case() {
        for raw in ["high", "High", "HIGH", "hIgH"] {
            assert_eq!(star_count(raw), 3, "{raw}");
        }
        assert_eq!(star_count("MEDIUM"), 2);
        assert_eq!(star_count("low"), 1);
    }

    #[test]
    fn star_count_is_monotonic() {
        assert!(star_count("high") > star_count("medium"));
        assert!(star_count("medium") > star_count("low"));
        assert!(star_count("low") > star_count("unknown"));
    }

    #[test]
    fn unrecognized_tier_defaults() {
        for raw in ["", "excellent", " high", "hi"] {
            assert_eq!(star_count(raw), 0, "{raw:?}");
            assert_eq!(tier_color(raw), GREEN);
            assert_eq!(tier_background_color(raw), GREEN_BG);
        }
    }

    #[test]
    fn tier_palette() {
        assert_eq!(tier_color("High"), GREEN);
        assert_eq!(tier_color("medium"), ORANGE);
        assert_eq!(tier_color("LOW"), RED);
        assert_eq!(tier_background_color("medium"), ORANGE_BG);
        assert_eq!(tier_background_color("low"), RED_BG);
    }

    #[test]
    fn tier_display_preserves_case() {
        let d = TierDisplay::derive("MeDiUm");
        assert_eq!(d.name, "MeDiUm");
        assert_eq!(d.tier, Tier::Medium);
        assert_eq!(d.star_count, 2);
        assert_eq!(d.max_stars, 3);
    }

    #[test]
    fn forecast_labels() {
        assert_eq!(forecast_label(1), "Sales Expected");
        assert_eq!(forecast_label(0), "No Sales Expected");
        assert_eq!(forecast_label(2), "No Sales Expected");
        assert_eq!(forecast_label(-1), "No Sales Expected");
    }

    #[test]
    fn forecast_trend_and_colors() {
        let up = forecast(1);
        assert_eq!(up.trend, Trend::Up);
        assert_eq!(up.background_color, GREEN_BG);

        let down = forecast(0);
        assert_eq!(down.trend, Trend::Down);
        assert_eq!(down.primary_color, RED);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Unrecognized).unwrap();
        assert_eq!(json, "\"unrecognized\"");
    }
}
