// In crates/strategies/src/ma_crossover.rs

use core_types::{AveragedPoint, Event, EventKind, PriceSeries};
use serde::Serialize;

use crate::crossover::detect_crossovers;
use crate::error::{Error, Result};
use crate::regime::classify;
use crate::rolling::rolling_mean;
use crate::types::MACrossoverSettings;
use crate::Strategy;

/// Everything one crossover run produces: the annotated series and the events found in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossoverReport {
    /// One entry per input point, in the same order.
    pub points: Vec<AveragedPoint>,
    /// Crossover events in timestamp order.
    pub events: Vec<Event>,
}

impl CrossoverReport {
    /// Golden crosses.
    pub fn buys(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.kind == EventKind::Buy)
    }

    /// Death crosses.
    pub fn sells(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.kind == EventKind::Sell)
    }
}

/// The simple moving average crossover strategy.
///
/// A short window at or above the long window is accepted; it is merely an
/// odd configuration, not an invalid one.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Self {
        Self { settings }
    }

    fn validate(&self) -> Result<()> {
        if self.settings.short_window < 1 {
            return Err(Error::InvalidConfig(
                "short_window must be at least 1".to_string(),
            ));
        }
        if self.settings.long_window < 1 {
            return Err(Error::InvalidConfig(
                "long_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn run(&self, series: &PriceSeries) -> Result<CrossoverReport> {
        // 1. Reject bad windows and empty input before any stage runs.
        self.validate()?;
        if series.is_empty() {
            return Err(Error::EmptyInput);
        }

        // 2. Both averages over the closes.
        let short = rolling_mean(series, self.settings.short_window)?;
        let long = rolling_mean(series, self.settings.long_window)?;

        // 3. Regimes, then the flips between them.
        let regimes = classify(&short, &long)?;
        let events = detect_crossovers(&regimes, series)?;

        let points = series
            .points()
            .iter()
            .zip(short.iter().zip(&long))
            .map(|(point, (&short_avg, &long_avg))| AveragedPoint {
                timestamp: point.timestamp,
                close: point.close,
                short_avg,
                long_avg,
            })
            .collect();

        Ok(CrossoverReport { points, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::PricePoint;

    fn series_from(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Days::new(i as u64), c))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    fn strategy(short_window: usize, long_window: usize) -> MACrossover {
        MACrossover::new(MACrossoverSettings {
            short_window,
            long_window,
        })
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let series = series_from(&[1.0, 2.0]);
        assert!(matches!(strategy(0, 3).run(&series), Err(Error::InvalidConfig(_))));
        assert!(matches!(strategy(2, 0).run(&series), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_is_checked_before_emptiness() {
        let series = series_from(&[]);
        assert!(matches!(strategy(0, 3).run(&series), Err(Error::InvalidConfig(_))));
        assert_eq!(strategy(2, 3).run(&series), Err(Error::EmptyInput));
    }

    #[test]
    fn test_points_carry_both_averages() {
        let series = series_from(&[2.0, 4.0, 6.0, 8.0]);
        let report = strategy(2, 3).run(&series).unwrap();

        assert_eq!(report.points.len(), 4);
        assert_eq!(report.points[0].short_avg, None);
        assert_eq!(report.points[1].short_avg, Some(3.0));
        assert_eq!(report.points[1].long_avg, None);
        assert_eq!(report.points[2].long_avg, Some(4.0));
        assert_eq!(report.points[3].short_avg, Some(7.0));
        assert_eq!(report.points[3].close, 8.0);
        assert_eq!(report.points[3].timestamp, series.last().unwrap().timestamp);
    }

    #[test]
    fn test_short_window_above_long_window_is_accepted() {
        let series = series_from(&[5.0, 4.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(strategy(4, 2).run(&series).is_ok());
    }

    #[test]
    fn test_buys_and_sells_split_events() {
        let series = series_from(&[10.0, 10.0, 10.0, 14.0, 18.0, 12.0, 6.0, 3.0]);
        let report = strategy(1, 3).run(&series).unwrap();

        assert_eq!(report.buys().count(), 1);
        assert_eq!(report.sells().count(), 1);
        assert_eq!(report.buys().next().unwrap().price, 14.0);
        assert_eq!(report.sells().next().unwrap().price, 12.0);
    }

    #[test]
    fn test_input_is_left_untouched() {
        let series = series_from(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        let before = series.clone();
        let _ = strategy(2, 3).run(&series).unwrap();
        assert_eq!(series, before);
    }

    #[test]
    fn test_report_serializes_for_plotting() {
        let series = series_from(&[1.0, 2.0]);
        let report = strategy(1, 2).run(&series).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["points"][0]["long_avg"], serde_json::Value::Null);
        assert_eq!(json["points"][1]["long_avg"], 1.5);
        assert!(json["events"].as_array().unwrap().is_empty());
    }
}
