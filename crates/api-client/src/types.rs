// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The client for the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL, e.g. `https://query1.finance.yahoo.com`.
    pub base_url: String,
    /// Whether to prefer adjusted closes over raw closes.
    pub use_adjusted_close: bool,
}

/// Top-level envelope of a `/v8/finance/chart/{symbol}` response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// Either `result` or `error` is populated, never both.
#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    /// A short code such as "Not Found".
    pub code: String,
    pub description: String,
}

/// The series for one symbol.
///
/// Yahoo omits `timestamp` and the close arrays entirely when the range holds no sessions.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    /// Offset of the exchange's time zone from UTC, in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<RawQuote>,
    #[serde(default)]
    pub adjclose: Vec<RawAdjClose>,
}

/// Raw OHLCV columns. Only the close is read; entries are null on days without a print.
#[derive(Debug, Deserialize, Default)]
pub struct RawQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
