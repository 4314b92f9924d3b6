//! Response shapes returned by the prediction service.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of `GET /performance/{agentId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPerformanceResult {
    pub agent_code: String,
    /// Binary forecast: `1` means sales are expected, `0` means none.
    ///
    /// Read leniently: `1.0` counts as `1`, and strings, booleans, `null`,
    /// fractional numbers or a missing field become [`UNKNOWN_PREDICTION`].
    #[serde(
        default = "unknown_prediction",
        deserialize_with = "deserialize_prediction"
    )]
    pub prediction: i64,
    /// Tier name as the service spells it (`"High"`, `"medium"`, ...).
    pub performance_level: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Prediction value for a body whose forecast is not a whole number.
/// Renders as "No Sales Expected".
pub const UNKNOWN_PREDICTION: i64 = -1;

fn unknown_prediction() -> i64 {
    UNKNOWN_PREDICTION
}

fn deserialize_prediction<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let prediction = match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    Ok(prediction.unwrap_or(UNKNOWN_PREDICTION))
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Category → count mapping that remembers the order keys arrived in.
///
/// JSON objects carry an order on the wire and the pie chart must show
/// categories in exactly that order, so this is a vector of pairs rather
/// than a hash map. Keys are unique: a repeated key overwrites the earlier
/// count in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<(String, u64)>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a count, keeping the first position of the key.
    pub fn insert(&mut self, key: impl Into<String>, count: u64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((key, count)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, v)| acc.saturating_add(*v))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (k, v) in iter {
            dist.insert(k, v);
        }
        dist
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to non-negative counts")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Distribution, M::Error> {
                let mut dist = Distribution::new();
                while let Some((key, count)) = access.next_entry::<String, u64>()? {
                    dist.insert(key, count);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// Body of `GET /performance-distribution`.
#[derive(Debug, Deserialize)]
pub(crate) struct PerformanceDistributionBody {
    pub performance_distribution: Distribution,
}

/// Body of `GET /prediction-distribution`.
#[derive(Debug, Deserialize)]
pub(crate) struct PredictionDistributionBody {
    pub prediction_distribution: Distribution,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
