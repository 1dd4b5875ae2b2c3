// In crates/app-config/src/types.rs

use serde::Deserialize;
use strategies::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where daily closes are fetched from.
    pub market_data: MarketDataSettings,
    /// What to analyze when the command line does not say otherwise.
    pub analysis: AnalysisSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// Base URL of the Yahoo Finance chart API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Prefer dividend/split adjusted closes when the provider has them.
    pub use_adjusted_close: bool,
    pub user_agent: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnalysisSettings {
    pub ticker: String,
    pub short_window: usize,
    pub long_window: usize,
    /// Length of the default date range, ending today.
    pub lookback_days: u32,
}

impl AnalysisSettings {
    pub fn crossover_settings(&self) -> MACrossoverSettings {
        MACrossoverSettings {
            short_window: self.short_window,
            long_window: self.long_window,
        }
    }
}
