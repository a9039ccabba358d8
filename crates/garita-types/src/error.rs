//! Error types for the inspection engine

use thiserror::Error;

use crate::types::Direction;

/// Errors raised by the tabular store client
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unreachable(String),

    #[error("malformed store response: {0}")]
    MalformedResponse(String),

    #[error("bad range: {0}")]
    BadRange(String),

    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration not found")]
    NotFound,

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("data access error: {0}")]
    DataAccess(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("invalid tire configuration: {0}")]
    InvalidTireConfiguration(String),

    #[error("{direction} odometer {candidate} does not exceed last recorded reading {last_known}")]
    OdometerRegression {
        direction: Direction,
        last_known: f64,
        candidate: f64,
    },

    #[error("no open exit inspection for plate {0}")]
    NoOpenExit(String),

    #[error("row {0} was modified by another writer")]
    ConcurrentModification(u32),

    #[error("could not issue a consecutive number for {branch} after {attempts} attempts")]
    ConsecutiveNumberConflict { branch: String, attempts: u32 },

    #[error("entry recorded at row {row} but the consecutive number is still pending: {reason}")]
    NumberPending { row: u32, reason: String },

    #[error("report pipeline error: {0}")]
    Pipeline(String),
}

impl Error {
    /// Whether the caller may retry the same operation unchanged.
    ///
    /// Input errors (tires, odometer, missing open exit) are user-correctable
    /// and never retryable; store and concurrency failures are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::DataAccess(_)
                | Error::ConcurrentModification(_)
                | Error::ConsecutiveNumberConflict { .. }
                | Error::NumberPending { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
