// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Price series is empty")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, Error>;
