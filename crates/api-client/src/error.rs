// In crates/api-client/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("Failed to read price file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed price file at line {line}: {msg}")]
    Parse { line: usize, msg: String },
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Price data is not a valid series: {0}")]
    InvalidSeries(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
