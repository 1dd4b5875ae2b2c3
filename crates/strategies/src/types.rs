// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// Window of the fast ("short") simple moving average, in points.
    pub short_window: usize,
    /// Window of the slow ("long") simple moving average, in points.
    pub long_window: usize,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
        }
    }
}
