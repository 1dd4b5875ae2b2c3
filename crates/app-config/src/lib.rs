// In crates/app-config/src/lib.rs

use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AnalysisSettings, AppSettings, MarketDataSettings, Settings};

/// Loads the application settings from the `config/` directory of the working directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults.
/// 2. Merges `base.toml` from `dir`, if present.
/// 3. Merges an environment-specific file (e.g., `development.toml`), if present.
/// 4. Merges settings from environment variables (e.g., `APP_ANALYSIS__TICKER=MSFT`).
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = file_layers(dir, &environment)?
        .add_source(env_layer())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Environment overrides: `APP_` prefix, `__` between nested keys.
fn env_layer() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults plus the on-disk files, without the process environment.
fn file_layers(dir: &Path, environment: &str) -> Result<ConfigBuilder<DefaultState>> {
    let base = dir.join("base");
    let env_specific = dir.join(environment);

    let builder = Config::builder()
        .set_default("app.environment", environment)?
        .set_default("app.log_level", "info")?
        .set_default("market_data.base_url", "https://query1.finance.yahoo.com")?
        .set_default("market_data.timeout_secs", 30_i64)?
        .set_default("market_data.use_adjusted_close", true)?
        .set_default("market_data.user_agent", "Mozilla/5.0 (compatible; macross/0.1)")?
        .set_default("analysis.ticker", "GOOGL")?
        .set_default("analysis.short_window", 20_i64)?
        .set_default("analysis.long_window", 50_i64)?
        .set_default("analysis.lookback_days", 180_i64)?
        .add_source(File::with_name(&base.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_specific.to_string_lossy()).required(false));

    Ok(builder)
}
