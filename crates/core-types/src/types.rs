// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A ticker symbol, e.g. "GOOGL".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDate, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// An ordered, immutable sequence of closes.
///
/// Timestamps are strictly increasing. Gaps between dates (weekends, holidays,
/// skipped rows) are allowed and never filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, rejecting unordered or duplicate timestamps and non-finite closes.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(Error::NonFiniteClose {
                    date: point.timestamp,
                });
            }
            if index > 0 {
                let previous = points[index - 1].timestamp;
                if point.timestamp <= previous {
                    return Err(Error::UnorderedTimestamps {
                        index,
                        previous,
                        current: point.timestamp,
                    });
                }
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Iterates over the close prices in timestamp order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }
}

/// A price point annotated with its short and long rolling averages.
///
/// An average is `None` while its window is still filling up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AveragedPoint {
    pub timestamp: NaiveDate,
    pub close: f64,
    pub short_avg: Option<f64>,
    pub long_avg: Option<f64>,
}

/// Relationship between the short and the long average at one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    /// Short average strictly above the long average.
    Above,
    /// Short average below or equal to the long average.
    NotAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// Golden cross: the short average rises above the long average.
    Buy,
    /// Death cross: the short average falls back to or below the long average.
    Sell,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Buy => f.write_str("BUY"),
            EventKind::Sell => f.write_str("SELL"),
        }
    }
}

/// A crossover event, stamped with the date and close of the point where the regime flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    pub timestamp: NaiveDate,
    pub price: f64,
    pub kind: EventKind,
}
