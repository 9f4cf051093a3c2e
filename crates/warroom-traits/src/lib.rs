#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/warroom/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model for the warroom signal-fusion engine.
//!
//! This crate defines what upstream collaborators produce ([`SignalRecord`]),
//! what a store hands to the engine ([`SourceReading`], [`Snapshot`]) and the
//! [`RecordStore`] abstraction itself.

/// The version of the warroom-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod inputs;
pub mod reading;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, WarRoomError};
pub use inputs::{FundFlow, Positioning, Sentiment, TechnicalTrend};
pub use reading::{Snapshot, SourceReading};
pub use store::RecordStore;
pub use types::{SignalRecord, SourceId, Timestamp, ids};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
