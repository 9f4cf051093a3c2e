#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # warroom
//!
//! warroom is an umbrella crate that re-exports the warroom sub-crates and
//! adds the [`Engine`] tying them together.
//!
//! ## Quick Start
//!
//! ```
//! use warroom::{Engine, EngineConfig};
//! use warroom::traits::{Positioning, Snapshot, TechnicalTrend};
//! use chrono::Utc;
//!
//! # fn main() -> warroom::Result<()> {
//! let engine = Engine::new(EngineConfig::default())?;
//! let now = Utc::now();
//!
//! let snapshot = Snapshot::new()
//!     .with_record(
//!         Positioning { net_position: 182_000.0, status_label: "BULLISH".into() }
//!             .into_record(now),
//!     )
//!     .with_record(TechnicalTrend::from_averages(2650.0, 2620.0, 2480.0).into_record(now));
//!
//! let evaluation = engine.evaluate(&snapshot);
//! assert_eq!(evaluation.composite_score, 7.0);
//! assert_eq!(evaluation.band.name, "STRONG_BULLISH");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Records, snapshots, the [`RecordStore`](traits::RecordStore) seam and errors
//! - [`signals`] - Source table and per-source normalization
//! - [`combine`] - Weighted aggregation and band classification
//! - [`store`] - File-backed and in-memory record stores

mod config;
mod engine;
mod report;

/// Version information for the warroom crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core types: records, readings, snapshots and the store seam.
pub mod traits {
    pub use warroom_traits::*;
}

/// Source specifications and normalization.
///
/// The built-in sources live in [`registry`](signals::registry):
///
/// | Source | Weight | Labels |
/// |--------|--------|--------|
/// | `positioning` | 4 | `BULLISH` / `BEARISH` |
/// | `fund_flow` | 3 | `BUY` / `SELL` |
/// | `technical_trend` | 3 | `UPTREND`, `RECOVERY` / `DOWNTREND`, `CORRECTION` |
/// | `sentiment` (opt-in) | 2 | 0-100 score, 50 neutral |
pub mod signals {
    pub use warroom_signals::*;
}

/// Aggregation and classification.
pub mod combine {
    pub use warroom_combine::*;
}

/// Record store implementations.
pub mod store {
    pub use warroom_store::*;
}

pub use config::{CONFIG_ENV, EngineConfig};
pub use engine::Engine;
pub use report::{Evaluation, SourceBreakdown};

pub use warroom_combine::{BandTable, RecommendationBand};
pub use warroom_traits::{RecordStore, Result, Snapshot, WarRoomError};

/// Prelude module for convenient imports.
///
/// ```
/// use warroom::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{BandTable, Engine, EngineConfig, Evaluation, SourceBreakdown};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = WarRoomError::UnknownSource("oil".to_string());
        assert!(error.to_string().contains("oil"));
    }
}
