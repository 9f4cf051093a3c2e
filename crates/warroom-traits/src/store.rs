//! The record store abstraction.
//!
//! Collaborators write records on their own cadence; the engine side only ever
//! reads the latest record per source, once per evaluation, into a
//! [`Snapshot`].

use std::future::Future;

use crate::{Result, SignalRecord, Snapshot, SourceId, SourceReading};

/// Durable storage of the latest record per source.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single store can
/// serve several concurrent evaluations and writers.
pub trait RecordStore: Send + Sync {
    /// Reads the latest record of `source`.
    ///
    /// Never fails: a missing record is [`SourceReading::Missing`] and an
    /// undecodable one is [`SourceReading::Unreadable`].
    fn latest(&self, source: &SourceId) -> impl Future<Output = SourceReading> + Send;

    /// Stores `record` as the latest record of its source, replacing the
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be persisted.
    fn put(&self, record: SignalRecord) -> impl Future<Output = Result<()>> + Send;

    /// Reads the latest record of every source in `sources`.
    fn snapshot(&self, sources: &[SourceId]) -> impl Future<Output = Snapshot> + Send {
        async move {
            let mut snapshot = Snapshot::new();
            for source in sources {
                let reading = self.latest(source).await;
                snapshot.insert(source.clone(), reading);
            }
            snapshot
        }
    }
}
