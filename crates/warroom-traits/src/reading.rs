//! Per-source readings and the immutable snapshot handed to the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{SignalRecord, SourceId};

static MISSING: SourceReading = SourceReading::Missing;

/// What a store produced for one source at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceReading {
    /// The latest record of the source.
    Record(SignalRecord),
    /// The source has never produced data.
    Missing,
    /// A record exists but could not be read or decoded.
    Unreadable {
        /// Human-readable cause.
        reason: String,
    },
}

impl SourceReading {
    /// Returns the record, if one was read.
    pub const fn record(&self) -> Option<&SignalRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<SignalRecord> for SourceReading {
    fn from(record: SignalRecord) -> Self {
        Self::Record(record)
    }
}

impl From<Option<SignalRecord>> for SourceReading {
    fn from(record: Option<SignalRecord>) -> Self {
        record.map_or(Self::Missing, Self::Record)
    }
}

/// Immutable copy of the latest reading per source.
///
/// Taken once before an evaluation so that collaborators refreshing their
/// records concurrently cannot change what the engine sees mid-evaluation.
/// Sources not present in the snapshot read as [`SourceReading::Missing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    readings: BTreeMap<SourceId, SourceReading>,
}

impl Snapshot {
    /// Creates an empty snapshot in which every source is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the reading for a source, replacing any previous one.
    pub fn insert(&mut self, source: impl Into<SourceId>, reading: impl Into<SourceReading>) {
        self.readings.insert(source.into(), reading.into());
    }

    /// Builder-style variant of [`Snapshot::insert`].
    #[must_use]
    pub fn with(mut self, source: impl Into<SourceId>, reading: impl Into<SourceReading>) -> Self {
        self.insert(source, reading);
        self
    }

    /// Adds a record under its own source identifier.
    #[must_use]
    pub fn with_record(self, record: SignalRecord) -> Self {
        let source = record.source_id.clone();
        self.with(source, record)
    }

    /// Returns the reading for a source.
    pub fn get(&self, source: &str) -> &SourceReading {
        self.readings.get(source).unwrap_or(&MISSING)
    }

    /// Iterates over the explicitly recorded readings in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &SourceReading)> {
        self.readings.iter()
    }

    /// Number of explicitly recorded readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns whether no reading has been recorded.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl FromIterator<SignalRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = SignalRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_record)
    }
}
