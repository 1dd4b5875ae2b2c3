// In crates/strategies/src/rolling.rs

use core_types::PriceSeries;
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

use crate::error::{Error, Result};

/// Computes the simple moving average of the series' closes over `window` points.
///
/// The output is aligned with the input: index `i` holds the mean of the closes
/// at `[i - window + 1, i]`, or `None` while fewer than `window` points have
/// been seen. A window longer than the series yields only `None`s.
pub fn rolling_mean(series: &PriceSeries, window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(Error::InvalidConfig(
            "rolling window must be at least 1".to_string(),
        ));
    }

    let mut sma = Sma::new(window).map_err(|e| Error::InvalidConfig(format!("{:?}", e)))?;

    let averages = series
        .closes()
        .enumerate()
        .map(|(i, close)| {
            // Always feed the indicator so its running sum stays in step.
            let mean = sma.next(close);
            (i + 1 >= window).then_some(mean)
        })
        .collect();

    Ok(averages)
}
