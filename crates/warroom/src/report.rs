//! Structured result of one evaluation.
//!
//! This is what a reporter renders; it carries everything needed to explain
//! the verdict, source by source, but no presentation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warroom_combine::RecommendationBand;
use warroom_signals::ContributionStatus;
use warroom_traits::{Result, SourceId, Timestamp};

/// Per-source line of an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    /// Source identifier.
    pub source_id: SourceId,
    /// Whether the source counted toward the score.
    pub present: bool,
    /// Presence detail, including why an absent source is absent.
    pub status: ContributionStatus,
    /// Raw label as produced upstream, kept even when the source is absent.
    pub raw_status: Option<String>,
    /// Normalized direction in `[-1, 1]`.
    pub direction: f64,
    /// Configured weight.
    pub weight: f64,
    /// `weight * direction`, zero when absent.
    pub weighted_contribution: f64,
    /// Pattern of the label rule that matched, if any.
    pub matched_rule: Option<String>,
    /// Display-only payload of the record.
    pub payload: BTreeMap<String, Value>,
    /// When the record was produced.
    pub timestamp: Option<Timestamp>,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Per-source breakdown in configuration order.
    pub sources: Vec<SourceBreakdown>,
    /// Weighted sum of present contributions.
    pub composite_score: f64,
    /// Largest attainable absolute score.
    pub max_score: f64,
    /// Number of sources that counted.
    pub sources_present: usize,
    /// Number of configured sources.
    pub sources_total: usize,
    /// Band the composite score falls into.
    #[serde(rename = "recommendation_band")]
    pub band: RecommendationBand,
    /// Too few sources were present for the band to mean anything.
    pub indeterminate: bool,
}

impl Evaluation {
    /// Returns whether the verdict should not be presented as a market view.
    pub const fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Coverage as `present/total`, e.g. `"1/3"`.
    pub fn coverage(&self) -> String {
        format!("{}/{}", self.sources_present, self.sources_total)
    }

    /// Returns the breakdown of one source.
    pub fn source(&self, id: &str) -> Option<&SourceBreakdown> {
        self.sources.iter().find(|s| s.source_id.as_str() == id)
    }

    /// Serializes the evaluation as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
