//! Error types for FuelMaster

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid refill record: {0}")]
    InvalidRecord(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
