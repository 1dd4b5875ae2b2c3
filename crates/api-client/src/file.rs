// In crates/api-client/src/file.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{PricePoint, PriceSeries, Symbol};
use std::io::BufRead;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::{PriceSource, check_range};

/// Reads daily closes from a local history file.
///
/// One `DATE PRICE` row per line. Dates are `YYYYMMDD` or `YYYY-MM-DD`; the two
/// fields may be separated by spaces, tabs or a comma. Blank lines and lines
/// starting with `#` are ignored, and a leading header row (e.g. `Date,Close`)
/// is skipped.
#[derive(Debug, Clone)]
pub struct FilePriceSource {
    path: PathBuf,
}

impl FilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceSource for FilePriceSource {
    fn name(&self) -> &'static str {
        "PriceFile"
    }

    async fn fetch_daily_closes(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        check_range(start, end)?;
        tracing::info!(
            symbol = %symbol,
            path = %self.path.display(),
            "Reading daily closes from file..."
        );

        let file = std::fs::File::open(&self.path)?;
        let points: Vec<PricePoint> = parse_price_history(std::io::BufReader::new(file))?
            .into_iter()
            .filter(|p| p.timestamp >= start && p.timestamp <= end)
            .collect();

        tracing::info!(count = points.len(), "Loaded daily closes in range.");
        Ok(PriceSeries::new(points)?)
    }
}

/// Parses every row of a price history, in file order.
pub fn parse_price_history<R: BufRead>(reader: R) -> Result<Vec<PricePoint>> {
    let mut points = Vec::new();
    let mut seen_content = false;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first_content = !seen_content;
        seen_content = true;

        let mut fields = line.split([' ', '\t', ',']).filter(|s| !s.is_empty());
        let date_str = fields.next().unwrap_or_default();

        let Some(timestamp) = parse_date(date_str) else {
            if first_content && date_str.chars().any(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            return Err(Error::Parse {
                line: line_num + 1,
                msg: format!("invalid date '{}'", date_str),
            });
        };

        let price_str = fields.next().ok_or_else(|| Error::Parse {
            line: line_num + 1,
            msg: "no price found".to_string(),
        })?;
        let close = price_str.parse::<f64>().map_err(|_| Error::Parse {
            line: line_num + 1,
            msg: format!("invalid price '{}'", price_str),
        })?;
        if !(close > 0.0 && close.is_finite()) {
            return Err(Error::Parse {
                line: line_num + 1,
                msg: format!("non-positive price {}", close),
            });
        }

        points.push(PricePoint::new(timestamp, close));
    }

    Ok(points)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        NaiveDate::parse_from_str(s, "%Y%m%d").ok()
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}
