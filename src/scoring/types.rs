use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-league weight for one scoring category.
///
/// Weights are signed: penalties such as "throwing a club" carry negative values.
///
/// Example JSON:
/// ```json
/// { "category": "eagle", "weight": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointWeight {
    pub id: String,
    pub league: String,
    /// Normalized category label (trimmed, lowercase)
    pub category: String,
    pub weight: f64,
}

/// One player's recorded scoring for one round.
///
/// `counts` is the canonical representation. `total`, when present, is a
/// precomputed override and takes precedence during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointAllocation {
    pub id: String,
    pub league: String,
    pub round: String,
    pub player: String,
    #[serde(default)]
    pub counts: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl PointAllocation {
    /// True when two allocations store the same scoring content.
    pub fn same_content(&self, other: &PointAllocation) -> bool {
        self.counts == other.counts && self.total == other.total
    }
}

/// Request body for a weight write.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightInput {
    #[serde(alias = "type")]
    pub category: String,
    pub weight: f64,
}

/// Request body for an allocation upsert: counts, a precomputed total, or both.
///
/// Example JSON:
/// ```json
/// { "counts": { "eagle": 1, "par": 3, "bogey": 2 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AllocationPayload {
    #[serde(default)]
    pub counts: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub total: Option<f64>,
}

impl AllocationPayload {
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            counts: Some(counts.into_iter().map(|(c, n)| (c.into(), n)).collect()),
            total: None,
        }
    }

    pub fn from_total(total: f64) -> Self {
        Self {
            counts: None,
            total: Some(total),
        }
    }
}

/// Normalize a category label so lookups ignore case and surrounding whitespace.
pub fn normalize_category(label: &str) -> String {
    label.trim().to_ascii_lowercase()
}
