// In crates/core-types/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Timestamps must be strictly increasing: {current} at index {index} follows {previous}")]
    UnorderedTimestamps {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Close price on {date} is not a finite number")]
    NonFiniteClose { date: NaiveDate },
}

pub type Result<T> = std::result::Result<T, Error>;
