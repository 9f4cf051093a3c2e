//! Source registry and normalization for warroom.
//!
//! This crate knows what each upstream source means:
//! - Registry: weights, ordered label vocabularies and score scales per source
//! - Normalizer: turns a source's latest reading into a direction in `[-1, 1]`
//!
//! # Example
//!
//! ```
//! use warroom_signals::{normalize, registry};
//! use warroom_traits::{SourceReading, FundFlow};
//! use chrono::Utc;
//!
//! let spec = registry::fund_flow();
//! let record = FundFlow::from_change(231.4, 229.8, 7_400_000).into_record(Utc::now());
//!
//! let contribution = normalize(&spec, &SourceReading::Record(record));
//! assert_eq!(contribution.direction, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod normalizer;
pub mod registry;

// Re-export key types
pub use normalizer::{ContributionStatus, NormalizedContribution, normalize};
pub use registry::{LabelRule, ScoreScale, SourceCategory, SourceSpec};
