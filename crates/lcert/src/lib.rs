//! lcert - zero-free regions for L-functions from the explicit formula
//!
//! Given certified enclosures of the low-lying zeros of an L-function, the
//! real part of `-L'/L(z)` at a point `z` left of the critical strip is
//! bounded above by a computable expression (log term, digamma term,
//! truncated prime sum). The known zeros near `Im z` account for part of
//! that bound. A hypothetical extra zero at height `η` would add a positive
//! amount, and the largest `η` for which that amount provably overshoots is
//! a certified radius free of such zeros.
//!
//! Supported families:
//! - ζ(s), at any expansion point `x + iy` with `x < 0`
//! - real Dirichlet L-functions, Ramanujan Δ, and the conductor-37 elliptic
//!   curve, on the real axis
//!
//! Two searches are available: zeros off the critical line
//! ([`VerificationMode::RiemannHypothesis`]) and zeros missing from the
//! supplied list ([`VerificationMode::Completeness`]).
//!
//! All arithmetic is outward-rounded interval arithmetic from
//! [`lcert_interval`], so every reported radius is rigorous.
//!
//! # Example
//!
//! ```ignore
//! use lcert::{ExpansionPoint, LFunctionKind, MpfrOracle, Verifier, VerifierConfig,
//!             VerificationMode, VerifyRequest, ZeroStore};
//!
//! let config = VerifierConfig::default();
//! let prec = config.precision();
//! let verifier = Verifier::new(&zeros, &primes, &MpfrOracle, &config);
//! let outcome = verifier.verify(&VerifyRequest {
//!     point: ExpansionPoint::parse(prec, "-1", "0")?,
//!     tau: Interval::parse(prec, "40")?,
//!     terms: 100_000,
//!     kind: LFunctionKind::Riemann,
//!     mode: VerificationMode::RiemannHypothesis,
//!     include_tail: false,
//! })?;
//! ```

pub mod config;
pub mod error;
pub mod explicit;
pub mod kind;
pub mod loader;
pub mod oracle;
pub mod point;
pub mod primes;
pub mod search;
pub mod tail;
pub mod verify;
pub mod window_sum;
pub mod zeros;

pub use config::{OracleConfig, VerifierConfig};
pub use error::{LcertError, Result};
pub use explicit::{ExplicitFormula, WholeSum};
pub use kind::{LFunctionKind, VerificationMode};
pub use oracle::{MpfrOracle, NumericOracle, ProcessOracle, StaticOracle};
pub use point::ExpansionPoint;
pub use primes::{Coefficient, Encoding, PrimeTable, VonMangoldtSource};
pub use search::{ce_contribution, CounterexampleSearch, SearchOutcome};
pub use tail::TailBound;
pub use verify::{Outcome, Report, TailContribution, Verifier, VerifyRequest};
pub use window_sum::window_sum;
pub use zeros::{Window, ZeroStore};

pub use lcert_interval::{ComplexInterval, Interval, Precision};
