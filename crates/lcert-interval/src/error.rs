//! interval error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("invalid numeric literal {literal:?}: {reason}")]
    Parse { literal: String, reason: String },

    #[error("division by an interval containing zero: {0}")]
    DivisionByZero(String),

    #[error("{op} is undefined on {interval}")]
    Domain { op: &'static str, interval: String },

    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds { lower: String, upper: String },
}

pub type Result<T> = std::result::Result<T, IntervalError>;
