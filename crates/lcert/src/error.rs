//! error types for lcert

use lcert_interval::IntervalError;
use thiserror::Error;

/// Every failure is fatal: a certificate cannot be salvaged from inputs that
/// break the preconditions of the explicit formula, so nothing is retried here.
#[derive(Debug, Error)]
pub enum LcertError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid expansion point: {0}")]
    InvalidExpansionPoint(String),

    #[error(
        "window boundary {boundary} overlaps the enclosure {zero} of zero #{index}; \
         choose a different expansion point or radius"
    )]
    AmbiguousBoundary {
        boundary: String,
        index: usize,
        zero: String,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("numeric oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("known zeros already reach the explicit-formula bound: window sum {base} vs bound {bound}")]
    InconsistentBound { base: String, bound: String },

    #[error("no contradiction found up to the configured search limit {0}")]
    SearchLimit(u64),

    #[error("interval arithmetic: {0}")]
    Numeric(#[from] IntervalError),

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LcertError>;
