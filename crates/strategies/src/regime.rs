// In crates/strategies/src/regime.rs

use core_types::Regime;

use crate::error::{Error, Result};

/// Classifies each aligned pair of averages into a regime.
///
/// A tie counts as `NotAbove`. Where either average is absent the regime is
/// `None`; it is never treated as zero or as either regime.
pub fn classify(short: &[Option<f64>], long: &[Option<f64>]) -> Result<Vec<Option<Regime>>> {
    if short.len() != long.len() {
        return Err(Error::InvalidInput(format!(
            "short average has {} entries but long average has {}",
            short.len(),
            long.len()
        )));
    }

    let regimes = short
        .iter()
        .zip(long)
        .map(|(s, l)| match (s, l) {
            (Some(s), Some(l)) if s > l => Some(Regime::Above),
            (Some(_), Some(_)) => Some(Regime::NotAbove),
            _ => None,
        })
        .collect();

    Ok(regimes)
}
