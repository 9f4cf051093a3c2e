//! Aggregation and classification for warroom.
//!
//! This crate turns normalized per-source directions into a verdict:
//! - [`aggregate`] sums `weight * direction` over present sources
//! - [`BandTable`] maps the composite score onto a recommendation band
//!
//! # Examples
//!
//! ```rust
//! use warroom_combine::{BandTable, Term, aggregate};
//!
//! let score = aggregate(&[
//!     Term::present(4.0, 1.0),
//!     Term::present(3.0, 1.0),
//!     Term::present(3.0, 1.0),
//! ]);
//!
//! let table = BandTable::default();
//! let band = table.classify(score.value);
//! assert_eq!(band.name, "STRONG_BULLISH");
//! ```

mod aggregate;
mod band;

// Re-export main types
pub use aggregate::{CompositeScore, Term, aggregate};
pub use band::{BandTable, Interval, RecommendationBand, Threshold};
