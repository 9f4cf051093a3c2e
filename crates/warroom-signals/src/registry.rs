//! Source registry: weights, label vocabularies and score scales.
//!
//! A [`SourceSpec`] is the only place a source is registered. Adding a new
//! upstream collaborator means adding a `SourceSpec`; the aggregator and classifier do
//! not change.

use serde::{Deserialize, Serialize};
use warroom_traits::{Result, SourceId, WarRoomError, ids};

/// Source category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// Price-derived technical indicators
    Technical,
    /// Fund and ETF flows
    Flow,
    /// Futures positioning reports
    Positioning,
    /// News and sentiment scores
    Sentiment,
    /// Anything else
    Other,
}

impl SourceCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Technical => "Trend and momentum read from the price chart",
            Self::Flow => "Money moving into or out of bullion funds",
            Self::Positioning => "How large speculators are positioned in futures",
            Self::Sentiment => "Aggregate tone of recent news coverage",
            Self::Other => "Uncategorized source",
        }
    }
}

/// One entry of a source's ordered label vocabulary.
///
/// A label matches when it contains `pattern`, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRule {
    /// Substring to look for in the raw status.
    pub pattern: String,
    /// Direction assigned on a match, within `[-1, 1]`.
    pub direction: f64,
}

impl LabelRule {
    /// Creates a rule.
    pub fn new(pattern: impl Into<String>, direction: f64) -> Self {
        Self {
            pattern: pattern.into(),
            direction,
        }
    }

    /// Returns whether `label` contains this rule's pattern, ignoring case.
    pub fn matches(&self, label: &str) -> bool {
        label
            .to_lowercase()
            .contains(&self.pattern.to_lowercase())
    }
}

/// Linear mapping of a numeric payload field onto a direction.
///
/// `direction = clamp((value - neutral) / span, -1, 1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreScale {
    /// Payload field holding the score.
    pub field: String,
    /// Value that maps to a direction of zero.
    pub neutral: f64,
    /// Distance from `neutral` that maps to a full ±1.
    pub span: f64,
}

impl ScoreScale {
    /// Maps a value onto `[-1, 1]`.
    pub fn direction(&self, value: f64) -> f64 {
        ((value - self.neutral) / self.span).clamp(-1.0, 1.0)
    }
}

/// Definition of a signal source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Unique identifier
    pub id: SourceId,

    /// Maximum absolute contribution of this source to the composite score
    pub weight: f64,

    /// Category classification
    #[serde(default = "default_category")]
    pub category: SourceCategory,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Ordered label rules; the first match wins
    #[serde(default)]
    pub rules: Vec<LabelRule>,

    /// Continuous score mapping; takes precedence over `rules` when set
    #[serde(default)]
    pub scale: Option<ScoreScale>,

    /// Payload fields that must hold finite numbers for the source to count
    #[serde(default)]
    pub required_fields: Vec<String>,
}

const fn default_category() -> SourceCategory {
    SourceCategory::Other
}

impl SourceSpec {
    /// Creates a spec with no rules, scale or required fields.
    pub fn new(id: impl Into<SourceId>, weight: f64, category: SourceCategory) -> Self {
        Self {
            id: id.into(),
            weight,
            category,
            description: String::new(),
            rules: Vec::new(),
            scale: None,
            required_fields: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a label rule after the existing ones.
    #[must_use]
    pub fn rule(mut self, pattern: impl Into<String>, direction: f64) -> Self {
        self.rules.push(LabelRule::new(pattern, direction));
        self
    }

    /// Sets the score scale.
    #[must_use]
    pub fn scaled(mut self, field: impl Into<String>, neutral: f64, span: f64) -> Self {
        self.scale = Some(ScoreScale {
            field: field.into(),
            neutral,
            span,
        });
        self
    }

    /// Declares required numeric payload fields.
    #[must_use]
    pub fn require<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Returns a copy with a different weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the first rule matching `label`.
    pub fn match_label(&self, label: &str) -> Option<&LabelRule> {
        self.rules.iter().find(|rule| rule.matches(label))
    }

    /// Checks the definition for values that would make the engine's output
    /// misleading.
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::Configuration`] for a non-positive or
    /// non-finite weight, an empty identifier, an empty rule pattern, a rule
    /// direction outside `[-1, 1]`, an invalid scale, or a source with neither
    /// rules nor a scale.
    pub fn validate(&self) -> Result<()> {
        let id = &self.id;
        if id.as_str().trim().is_empty() {
            return Err(WarRoomError::config("source id must not be empty"));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(WarRoomError::config(format!(
                "source '{id}' has weight {}, expected a positive finite number",
                self.weight
            )));
        }
        if self.rules.is_empty() && self.scale.is_none() {
            return Err(WarRoomError::config(format!(
                "source '{id}' has neither label rules nor a score scale"
            )));
        }
        for rule in &self.rules {
            if rule.pattern.trim().is_empty() {
                return Err(WarRoomError::config(format!(
                    "source '{id}' has a rule with an empty pattern"
                )));
            }
            if !rule.direction.is_finite() || rule.direction.abs() > 1.0 {
                return Err(WarRoomError::config(format!(
                    "source '{id}' rule '{}' has direction {}, expected a value in [-1, 1]",
                    rule.pattern, rule.direction
                )));
            }
        }
        if let Some(scale) = &self.scale {
            if scale.field.trim().is_empty() {
                return Err(WarRoomError::config(format!(
                    "source '{id}' scale has an empty field name"
                )));
            }
            if !scale.neutral.is_finite() || !scale.span.is_finite() || scale.span <= 0.0 {
                return Err(WarRoomError::config(format!(
                    "source '{id}' scale needs a finite neutral and a positive span"
                )));
            }
        }
        Ok(())
    }
}

/// Moving-average trend; partial moves count a third of a full trend.
#[must_use]
pub fn technical_trend() -> SourceSpec {
    SourceSpec::new(ids::TECHNICAL_TREND, 3.0, SourceCategory::Technical)
        .describe("Spot price against its 10- and 50-period moving averages")
        .rule("UPTREND", 1.0)
        .rule("RECOVERY", 1.0 / 3.0)
        .rule("DOWNTREND", -1.0)
        .rule("CORRECTION", -1.0 / 3.0)
        .require(["price"])
}

/// Bullion ETF flow.
#[must_use]
pub fn fund_flow() -> SourceSpec {
    SourceSpec::new(ids::FUND_FLOW, 3.0, SourceCategory::Flow)
        .describe("Daily direction of the bullion ETF close")
        .rule("BUY", 1.0)
        .rule("SELL", -1.0)
        .require(["price", "volume"])
}

/// Commitments-of-traders positioning.
#[must_use]
pub fn positioning() -> SourceSpec {
    SourceSpec::new(ids::POSITIONING, 4.0, SourceCategory::Positioning)
        .describe("Net futures position of large speculators")
        .rule("BULLISH", 1.0)
        .rule("BEARISH", -1.0)
        .require(["net_position"])
}

/// News sentiment, 0-100 with 50 neutral.
#[must_use]
pub fn sentiment() -> SourceSpec {
    SourceSpec::new(ids::SENTIMENT, 2.0, SourceCategory::Sentiment)
        .describe("Overall sentiment of recent news, 0-100")
        .scaled("score", 50.0, 50.0)
        .require(["score"])
}

/// The default source table, in accumulation order.
#[must_use]
pub fn default_sources() -> Vec<SourceSpec> {
    vec![positioning(), fund_flow(), technical_trend()]
}

/// Every built-in source, including opt-in ones.
#[must_use]
pub fn builtin_sources() -> Vec<SourceSpec> {
    vec![positioning(), fund_flow(), technical_trend(), sentiment()]
}

/// Get a built-in source by identifier.
#[must_use]
pub fn get_builtin(id: &str) -> Option<SourceSpec> {
    builtin_sources()
        .into_iter()
        .find(|spec| spec.id.as_str() == id)
}
