// In crates/strategies/src/lib.rs

use core_types::PriceSeries;

pub mod crossover;
pub mod error;
pub mod ma_crossover;
pub mod regime;
pub mod rolling;
pub mod types;

pub use error::{Error, Result};
pub use ma_crossover::{CrossoverReport, MACrossover};
pub use types::MACrossoverSettings;

/// The universal interface for a signal-generating strategy.
///
/// A strategy reads a complete price history and produces a report of the
/// events it would have signalled. It never mutates the series and keeps no
/// state between runs, so the same input always yields the same report.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn run(&self, series: &PriceSeries) -> Result<CrossoverReport>;
}
