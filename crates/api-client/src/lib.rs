// In crates/api-client/src/lib.rs

use app_config::MarketDataSettings;
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use core_types::{PricePoint, PriceSeries, Symbol};
use std::time::Duration;

pub mod error;
pub mod file;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use file::FilePriceSource;
pub use types::*;

/// The universal interface for a source of historical daily closes.
#[async_trait]
pub trait PriceSource {
    /// The name of the source (e.g., "YahooFinance", "PriceFile").
    fn name(&self) -> &'static str;

    /// Fetches the daily closes of `symbol` between `start` and `end`, both inclusive.
    ///
    /// An unknown symbol or a range without sessions yields an empty series
    /// rather than an error. Failed requests are not retried.
    async fn fetch_daily_closes(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;
}

pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    Ok(())
}

impl YahooClient {
    /// Constructs a new YahooClient from MarketDataSettings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(YahooClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            use_adjusted_close: settings.use_adjusted_close,
        })
    }

    /// Fetches the raw daily chart for a symbol.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint. The
    /// `period2` bound is exclusive, so it is set to midnight after `end`.
    pub async fn get_daily_chart(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<ChartResult>> {
        let period1 = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let period2 = (end + Days::new(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol.0);
        tracing::debug!(%url, period1, period2, "Requesting daily chart");

        // Yahoo reports unknown symbols with a 404 and an error body, so the
        // status is not checked before parsing.
        let response_body = self
            .http_client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let response: ChartResponse =
            serde_json::from_str(&response_body).map_err(Error::DeserializationFailed)?;

        if let Some(err) = response.chart.error {
            if err.code == "Not Found" {
                tracing::warn!(symbol = %symbol, description = %err.description, "Symbol not found");
                return Ok(None);
            }
            return Err(Error::ApiError {
                code: err.code,
                msg: err.description,
            });
        }

        Ok(response.chart.result.and_then(|results| results.into_iter().next()))
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    fn name(&self) -> &'static str {
        "YahooFinance"
    }

    async fn fetch_daily_closes(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        check_range(start, end)?;
        tracing::info!(symbol = %symbol, %start, %end, "Fetching daily closes...");

        let Some(chart) = self.get_daily_chart(symbol, start, end).await? else {
            return Ok(PriceSeries::default());
        };

        let points = chart_to_points(&chart, self.use_adjusted_close, start, end);
        tracing::info!(symbol = %symbol, count = points.len(), "Received daily closes.");

        Ok(PriceSeries::new(points)?)
    }
}

/// Converts a chart into dated closes within `[start, end]`.
///
/// Timestamps are shifted by the exchange's UTC offset before taking the date.
/// Rows with a null close are dropped, not filled. When a date repeats (Yahoo
/// sometimes appends the live session), the later row wins.
fn chart_to_points(
    chart: &ChartResult,
    use_adjusted_close: bool,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PricePoint> {
    let adjusted = chart
        .indicators
        .adjclose
        .first()
        .map(|a| &a.adjclose)
        .filter(|closes| closes.len() == chart.timestamp.len());
    let raw = chart.indicators.quote.first().map(|q| &q.close);

    let closes = match (use_adjusted_close, adjusted, raw) {
        (true, Some(adjusted), _) => adjusted,
        (_, _, Some(raw)) => raw,
        (_, Some(adjusted), None) => adjusted,
        (_, None, None) => return Vec::new(),
    };

    let mut points: Vec<PricePoint> = Vec::with_capacity(closes.len());
    let mut skipped = 0usize;

    for (&ts, &close) in chart.timestamp.iter().zip(closes) {
        let Some(close) = close.filter(|c| c.is_finite()) else {
            skipped += 1;
            continue;
        };
        let Some(local) = DateTime::from_timestamp(ts + chart.meta.gmtoffset, 0) else {
            skipped += 1;
            continue;
        };
        let date = local.date_naive();
        if date < start || date > end {
            continue;
        }

        match points.last_mut() {
            Some(last) if last.timestamp == date => last.close = close,
            _ => points.push(PricePoint::new(date, close)),
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Dropped rows without a usable close.");
    }

    points
}
