//! Recommendation bands and the score classifier.
//!
//! A [`BandTable`] lists bands from lowest to highest. Each band but the first
//! starts at a [`Threshold`]; a band ends where the next one starts. The first
//! band is unbounded below and the last unbounded above, so every score falls
//! into exactly one band.

use std::fmt;

use serde::{Deserialize, Serialize};
use warroom_traits::{Result, WarRoomError};

/// Lower edge of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Edge value.
    pub value: f64,
    /// Whether a score equal to `value` belongs to this band (`true`) or to
    /// the band below (`false`).
    pub inclusive: bool,
}

impl Threshold {
    /// `score >= value`.
    pub const fn at_least(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    /// `score > value`.
    pub const fn above(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }

    /// Returns whether `score` is on or above this edge.
    pub fn admits(&self, score: f64) -> bool {
        if self.inclusive {
            score >= self.value
        } else {
            score > self.value
        }
    }
}

/// A named score range with its action directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBand {
    /// Band label, e.g. `STRONG_BULLISH`.
    pub name: String,
    /// What to do when the composite lands in this band.
    pub directive: String,
    /// Lower edge; `None` only for the lowest band.
    #[serde(default)]
    pub lower: Option<Threshold>,
}

impl RecommendationBand {
    /// Creates a band.
    pub fn new(
        name: impl Into<String>,
        directive: impl Into<String>,
        lower: Option<Threshold>,
    ) -> Self {
        Self {
            name: name.into(),
            directive: directive.into(),
            lower,
        }
    }
}

/// Ordered, contiguous set of bands covering the whole real line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RecommendationBand>", into = "Vec<RecommendationBand>")]
pub struct BandTable {
    bands: Vec<RecommendationBand>,
}

impl BandTable {
    /// Builds a table from bands listed lowest first.
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::Configuration`] if the table is empty, the
    /// lowest band has a lower edge, any other band lacks one, edges are not
    /// finite and strictly increasing, or names are empty or duplicated.
    pub fn new(bands: Vec<RecommendationBand>) -> Result<Self> {
        let Some(first) = bands.first() else {
            return Err(WarRoomError::config("band table is empty"));
        };
        if first.lower.is_some() {
            return Err(WarRoomError::config(format!(
                "lowest band '{}' must not have a lower edge",
                first.name
            )));
        }

        let mut previous: Option<f64> = None;
        for (i, band) in bands.iter().enumerate() {
            if band.name.trim().is_empty() {
                return Err(WarRoomError::config("band names must not be empty"));
            }
            if bands[..i].iter().any(|b| b.name == band.name) {
                return Err(WarRoomError::config(format!(
                    "duplicate band '{}'",
                    band.name
                )));
            }
            if i == 0 {
                continue;
            }
            let Some(lower) = band.lower else {
                return Err(WarRoomError::config(format!(
                    "band '{}' needs a lower edge",
                    band.name
                )));
            };
            if !lower.value.is_finite() {
                return Err(WarRoomError::config(format!(
                    "band '{}' has a non-finite edge",
                    band.name
                )));
            }
            if previous.is_some_and(|p| lower.value <= p) {
                return Err(WarRoomError::config(format!(
                    "band '{}' starts at {} which overlaps the band below",
                    band.name, lower.value
                )));
            }
            previous = Some(lower.value);
        }

        Ok(Self { bands })
    }

    /// Five bands symmetric around zero:
    ///
    /// ```text
    /// score >= high            STRONG_BULLISH
    /// mid <= score < high      MODERATE_BULLISH
    /// -mid < score < mid       NEUTRAL
    /// -high <= score <= -mid   MODERATE_BEARISH
    /// score < -high            STRONG_BEARISH
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::Configuration`] unless `0 < mid < high`.
    pub fn symmetric(mid: f64, high: f64) -> Result<Self> {
        if !(mid > 0.0 && high > mid && high.is_finite()) {
            return Err(WarRoomError::config(format!(
                "symmetric bands need 0 < mid < high, got mid={mid} high={high}"
            )));
        }
        Self::new(symmetric_bands(mid, high))
    }

    /// Returns the band containing `score`.
    ///
    /// Scans from the highest band down and returns the first whose lower
    /// edge admits the score; the lowest band takes everything else.
    pub fn classify(&self, score: f64) -> &RecommendationBand {
        self.bands
            .iter()
            .rev()
            .find(|band| band.lower.is_none_or(|lower| lower.admits(score)))
            .unwrap_or(&self.bands[0])
    }

    /// Bands, lowest first.
    pub fn bands(&self) -> &[RecommendationBand] {
        &self.bands
    }

    /// Describes the interval covered by the band at `index`, e.g. `[3, 7)`.
    pub fn interval(&self, index: usize) -> Option<Interval> {
        let band = self.bands.get(index)?;
        Some(Interval {
            lower: band.lower,
            upper: self.bands.get(index + 1).and_then(|next| next.lower),
        })
    }
}

/// Bands of [`BandTable::symmetric`], lowest first. Edges are strictly
/// increasing whenever `0 < mid < high`.
fn symmetric_bands(mid: f64, high: f64) -> Vec<RecommendationBand> {
    vec![
        RecommendationBand::new(
            "STRONG_BEARISH",
            "Sell into strength; open SELL positions or exit longs",
            None,
        ),
        RecommendationBand::new(
            "MODERATE_BEARISH",
            "Look for SELL entries on bounces or reduce exposure",
            Some(Threshold::at_least(-high)),
        ),
        RecommendationBand::new(
            "NEUTRAL",
            "Sit on your hands or trade short ranges",
            Some(Threshold::above(-mid)),
        ),
        RecommendationBand::new(
            "MODERATE_BULLISH",
            "Wait for a pullback before buying; do not chase price",
            Some(Threshold::at_least(mid)),
        ),
        RecommendationBand::new(
            "STRONG_BULLISH",
            "Open BUY positions and ride the trend",
            Some(Threshold::at_least(high)),
        ),
    ]
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            bands: symmetric_bands(3.0, 7.0),
        }
    }
}

impl TryFrom<Vec<RecommendationBand>> for BandTable {
    type Error = WarRoomError;

    fn try_from(bands: Vec<RecommendationBand>) -> Result<Self> {
        Self::new(bands)
    }
}

impl From<BandTable> for Vec<RecommendationBand> {
    fn from(table: BandTable) -> Self {
        table.bands
    }
}

/// Score interval covered by one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Own lower edge.
    pub lower: Option<Threshold>,
    /// Lower edge of the next band up.
    pub upper: Option<Threshold>,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Some(t) if t.inclusive => write!(f, "[{}", t.value)?,
            Some(t) => write!(f, "({}", t.value)?,
            None => f.write_str("(-inf")?,
        }
        f.write_str(", ")?;
        // The next band owns its edge when inclusive, so ours is open there.
        match self.upper {
            Some(t) if t.inclusive => write!(f, "{})", t.value),
            Some(t) => write!(f, "{}]", t.value),
            None => f.write_str("+inf)"),
        }
    }
}
