//! Typed inputs for the built-in upstream collaborators.
//!
//! Each collaborator computes its own signal (moving averages, ETF flow,
//! commitments-of-traders positioning, news sentiment) and hands the result to
//! a store as a [`SignalRecord`]. These structs fix the field names so that
//! producers and the default source table agree.

use serde::{Deserialize, Serialize};

use crate::{SignalRecord, Timestamp, ids};

/// Trend derived from short and medium moving averages of the spot price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalTrend {
    /// Latest spot price.
    pub price: f64,
    /// Trend label, e.g. `UPTREND`, `RECOVERY`, `CORRECTION`, `DOWNTREND`.
    pub trend_label: String,
}

impl TechnicalTrend {
    /// Classifies the trend from the price and its 10- and 50-period averages.
    ///
    /// Above both averages is an uptrend, below both a downtrend; above only the
    /// short average is a recovery, anything else a correction.
    pub fn from_averages(price: f64, short_ma: f64, long_ma: f64) -> Self {
        let trend_label = if price > short_ma && price > long_ma {
            "UPTREND"
        } else if price < short_ma && price < long_ma {
            "DOWNTREND"
        } else if price > short_ma {
            "RECOVERY"
        } else {
            "CORRECTION"
        };
        Self {
            price,
            trend_label: trend_label.to_string(),
        }
    }

    /// Converts into a record.
    pub fn into_record(self, timestamp: Timestamp) -> SignalRecord {
        SignalRecord::new(ids::TECHNICAL_TREND, timestamp)
            .with_status(self.trend_label)
            .with_field("price", self.price)
    }
}

/// Daily flow of the bullion ETF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundFlow {
    /// Latest ETF close.
    pub price: f64,
    /// Latest session volume.
    pub volume: u64,
    /// Flow label, `BUY` when the close rose and `SELL` otherwise.
    pub status_label: String,
}

impl FundFlow {
    /// Labels the flow from the change against the previous close.
    pub fn from_change(price: f64, previous_close: f64, volume: u64) -> Self {
        let status_label = if price > previous_close { "BUY" } else { "SELL" };
        Self {
            price,
            volume,
            status_label: status_label.to_string(),
        }
    }

    /// Converts into a record.
    pub fn into_record(self, timestamp: Timestamp) -> SignalRecord {
        SignalRecord::new(ids::FUND_FLOW, timestamp)
            .with_status(self.status_label)
            .with_field("price", self.price)
            .with_field("volume", self.volume)
    }
}

/// Net positioning of large speculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Positioning {
    /// Net long minus short contracts.
    pub net_position: f64,
    /// Positioning label, e.g. `BULLISH` or `BEARISH`.
    pub status_label: String,
}

impl Positioning {
    /// Converts into a record.
    pub fn into_record(self, timestamp: Timestamp) -> SignalRecord {
        SignalRecord::new(ids::POSITIONING, timestamp)
            .with_status(self.status_label)
            .with_field("net_position", self.net_position)
    }
}

/// Aggregate news sentiment on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Overall score, 50 being neutral.
    pub score: f64,
    /// Short summary shown in place of a status label.
    pub summary: String,
}

impl Sentiment {
    /// Converts into a record.
    pub fn into_record(self, timestamp: Timestamp) -> SignalRecord {
        SignalRecord::new(ids::SENTIMENT, timestamp)
            .with_status(self.summary)
            .with_field("score", self.score)
    }
}
