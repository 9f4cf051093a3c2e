//! In-process store, mostly for tests and backtests.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use warroom_traits::{RecordStore, Result, SignalRecord, SourceId, SourceReading};

/// Keeps the latest reading of each source in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    readings: RwLock<BTreeMap<SourceId, SourceReading>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary reading, e.g. [`SourceReading::Unreadable`], for a
    /// source.
    pub async fn set_reading(&self, source: impl Into<SourceId>, reading: SourceReading) {
        self.readings.write().await.insert(source.into(), reading);
    }

    /// Forgets a source so that it reads as missing again.
    pub async fn clear(&self, source: &SourceId) {
        self.readings.write().await.remove(source);
    }
}

impl RecordStore for MemoryStore {
    async fn latest(&self, source: &SourceId) -> SourceReading {
        self.readings
            .read()
            .await
            .get(source)
            .cloned()
            .unwrap_or(SourceReading::Missing)
    }

    async fn put(&self, record: SignalRecord) -> Result<()> {
        let source = record.source_id.clone();
        self.readings
            .write()
            .await
            .insert(source, SourceReading::Record(record));
        Ok(())
    }
}
