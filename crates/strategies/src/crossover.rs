// In crates/strategies/src/crossover.rs

use core_types::{Event, EventKind, PriceSeries, Regime};

use crate::error::{Error, Result};

/// Where the scan stands at a given index.
///
/// `WarmingUp` covers every index without a regime. Only a direct move
/// between `NotAbove` and `Above` is a crossover; leaving `WarmingUp` is the
/// first regime reading and stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    WarmingUp,
    NotAbove,
    Above,
}

impl From<Option<Regime>> for ScanState {
    fn from(regime: Option<Regime>) -> Self {
        match regime {
            None => ScanState::WarmingUp,
            Some(Regime::NotAbove) => ScanState::NotAbove,
            Some(Regime::Above) => ScanState::Above,
        }
    }
}

impl ScanState {
    /// The event fired by moving from `self` to `next`, if any.
    fn transition(self, next: ScanState) -> Option<EventKind> {
        match (self, next) {
            (ScanState::NotAbove, ScanState::Above) => Some(EventKind::Buy),
            (ScanState::Above, ScanState::NotAbove) => Some(EventKind::Sell),
            _ => None,
        }
    }
}

/// Emits a Buy or Sell event at every index whose regime differs from the previous index's.
///
/// Both regimes of the pair must be defined. The event carries the date and
/// close of the later point. Index 0 never fires.
pub fn detect_crossovers(regimes: &[Option<Regime>], series: &PriceSeries) -> Result<Vec<Event>> {
    if regimes.len() != series.len() {
        return Err(Error::InvalidInput(format!(
            "regime sequence has {} entries but the price series has {}",
            regimes.len(),
            series.len()
        )));
    }

    let mut events = Vec::new();
    let mut state = ScanState::WarmingUp;

    for (regime, point) in regimes.iter().zip(series.points()) {
        let next = ScanState::from(*regime);
        if let Some(kind) = state.transition(next) {
            events.push(Event {
                timestamp: point.timestamp,
                price: point.close,
                kind,
            });
        }
        state = next;
    }

    Ok(events)
}
