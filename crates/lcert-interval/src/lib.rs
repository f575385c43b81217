//! Rigorous interval arithmetic over MPFR floats
//!
//! Each [`Interval`] is a pair of arbitrary-precision endpoints that is
//! guaranteed to contain the true value of the quantity it stands for.
//! Lower endpoints are always rounded toward −∞ and upper endpoints toward
//! +∞, so enclosures survive any sequence of operations exposed here.
//!
//! # Precision
//!
//! There is no global precision setting. A [`Precision`] value is handed to
//! every constructor that reads a literal; arithmetic between intervals runs
//! at the larger of the operand precisions.
//!
//! # Example
//!
//! ```ignore
//! use lcert_interval::{Interval, Precision};
//!
//! let p = Precision::from_digits(40);
//! let x = Interval::parse(p, "-1")?;
//! let pi = Interval::pi(p);
//! let log_term = -(pi.ln()? * Interval::parse(p, "1/2")?);
//! assert!(log_term.certainly_negative());
//! ```

mod complex;
mod error;
mod interval;
mod precision;

pub use complex::ComplexInterval;
pub use error::{IntervalError, Result};
pub use interval::Interval;
pub use precision::Precision;

/// Endpoint type, re-exported so callers need not depend on `rug` directly.
pub use rug::Float;
