//! Common types used throughout the warroom workspace.
//!
//! A [`SignalRecord`] is the latest output of one upstream collaborator. Its
//! payload is kept loosely typed on purpose: records arrive from independent
//! producers and a malformed numeric field must degrade only its own source.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, WarRoomError};

/// Point in time at which a record was produced.
pub type Timestamp = DateTime<Utc>;

/// Identifiers of the built-in sources.
pub mod ids {
    /// Moving-average trend of the spot price.
    pub const TECHNICAL_TREND: &str = "technical_trend";
    /// Daily fund flow of the bullion ETF.
    pub const FUND_FLOW: &str = "fund_flow";
    /// Large-speculator positioning from the commitments-of-traders report.
    pub const POSITIONING: &str = "positioning";
    /// Overall news sentiment score.
    pub const SENTIMENT: &str = "sentiment";
}

/// Identifier of a signal source.
///
/// Sources are registered only in the engine configuration, so the identifier
/// is an open string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new source identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for SourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The latest record produced by one upstream collaborator.
///
/// # Example
///
/// ```
/// use warroom_traits::{SignalRecord, ids};
/// use chrono::Utc;
///
/// let record = SignalRecord::new(ids::FUND_FLOW, Utc::now())
///     .with_status("BUY (accumulating)")
///     .with_field("price", 231.4)
///     .with_field("volume", 8_120_000);
///
/// assert_eq!(record.numeric_field("price").unwrap(), 231.4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Source that produced this record.
    pub source_id: SourceId,

    /// Free-form status label, if the producer emitted one.
    #[serde(default)]
    pub raw_status: Option<String>,

    /// Numeric payload (price, net position, volume, score, ...).
    ///
    /// Values are kept as raw JSON so that a malformed field can be detected
    /// and reported instead of failing the whole record.
    #[serde(default)]
    pub payload: BTreeMap<String, Value>,

    /// When the producer generated the record.
    pub timestamp: Timestamp,
}

impl SignalRecord {
    /// Creates an empty record for `source_id`.
    pub fn new(source_id: impl Into<SourceId>, timestamp: Timestamp) -> Self {
        Self {
            source_id: source_id.into(),
            raw_status: None,
            payload: BTreeMap::new(),
            timestamp,
        }
    }

    /// Sets the raw status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.raw_status = Some(status.into());
        self
    }

    /// Adds a payload field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    /// Reads a payload field as a finite `f64`.
    ///
    /// JSON numbers are accepted directly; strings are accepted when they
    /// parse as a number, since several producers write everything as text.
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::MalformedField`] if the field is missing, is not
    /// numeric, or is not finite.
    pub fn numeric_field(&self, name: &str) -> Result<f64> {
        let malformed = |reason: String| WarRoomError::MalformedField {
            source_id: self.source_id.to_string(),
            field: name.to_string(),
            reason,
        };

        let value = match self.payload.get(name) {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| malformed(format!("{n} is not representable")))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed(format!("'{s}' is not a number")))?,
            Some(other) => return Err(malformed(format!("unexpected value {other}"))),
            None => return Err(malformed("field is missing".to_string())),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(malformed(format!("{value} is not finite")))
        }
    }

    /// Returns the status label, or `None` if absent or blank.
    pub fn status(&self) -> Option<&str> {
        self.raw_status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
