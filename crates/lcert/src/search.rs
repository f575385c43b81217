//! Search for the nearest admissible counterexample
//!
//! A zero of the forbidden kind at height `η` above the expansion point
//! would add a positive amount to the window sum. Walking `η = 1, 2, …`
//! until that amount no longer certainly pushes the sum past the
//! explicit-formula bound gives the radius within which such a zero cannot
//! exist.

use lcert_interval::{Interval, Precision};
use tracing::debug;

use crate::error::{LcertError, Result};
use crate::kind::{LFunctionKind, VerificationMode};

/// `Re 1/(z − ρ) + Re 1/(z − (1 − ρ̄))` for `ρ = β + iη`, with `Im z = 0`
/// after recentring on the expansion point.
///
/// `(β − x)/((β − x)² + η²) + (1 − β − x)/((1 − β − x)² + η²)`
pub fn ce_contribution(x: &Interval, beta: &Interval, eta: &Interval) -> Result<Interval> {
    let prec = Precision::from_bits(x.prec());
    let eta_sq = eta.sqr();
    let near = beta - x;
    let far = &(&Interval::one(prec) - beta) - x;
    let a = near.try_div(&(&near.sqr() + &eta_sq))?;
    let b = far.try_div(&(&far.sqr() + &eta_sq))?;
    Ok(a + b)
}

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// largest `η` for which the candidate is ruled out; 0 if none is
    pub radius: u64,
    /// candidate contribution at `radius + 1`, the first one that failed
    pub last_contribution: Interval,
}

/// Parameters of one search.
#[derive(Clone, Debug)]
pub struct CounterexampleSearch {
    x: Interval,
    kind: LFunctionKind,
    mode: VerificationMode,
    max_radius: Option<u64>,
    progress_interval: u64,
}

impl CounterexampleSearch {
    pub fn new(x: &Interval, kind: LFunctionKind, mode: VerificationMode) -> Self {
        Self {
            x: x.clone(),
            kind,
            mode,
            max_radius: None,
            progress_interval: 0,
        }
    }

    /// Give up with [`LcertError::SearchLimit`] once the radius reaches `max`.
    pub fn with_max_radius(mut self, max: Option<u64>) -> Self {
        self.max_radius = max;
        self
    }

    /// Log progress every `interval` steps; 0 disables it.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Smaller of the two candidate contributions at height `eta`, doubled
    /// for families whose zeros come in conjugate pairs.
    pub fn contribution(&self, eta: &Interval) -> Result<Interval> {
        let prec = Precision::from_bits(self.x.prec());
        let half = Interval::parse(prec, "1/2")?;
        let (first, second) = match self.mode {
            VerificationMode::RiemannHypothesis => (
                ce_contribution(&self.x, &half, eta)?,
                ce_contribution(&self.x, &Interval::one(prec), eta)?,
            ),
            VerificationMode::Completeness => (
                &half * &ce_contribution(&self.x, &half, eta)?,
                ce_contribution(&self.x, &Interval::zero(prec), eta)?,
            ),
        };
        let value = first.min(&second);
        if self.kind.pairs_ordinates() {
            Ok(&Interval::from_i64(prec, 2) * &value)
        } else {
            Ok(value)
        }
    }

    /// Walk `η = 1, 2, …` while `base + contribution(η)` is certainly at
    /// least `upper`.
    ///
    /// Contributions are positive and shrink to zero, so the walk ends
    /// exactly when `base` is not already certainly above `upper`; that case
    /// is reported as [`LcertError::InconsistentBound`].
    pub fn run(&self, base: &Interval, upper: &Interval) -> Result<SearchOutcome> {
        if base.certainly_ge(upper) {
            return Err(LcertError::InconsistentBound {
                base: base.to_string(),
                bound: upper.to_string(),
            });
        }

        let prec = Precision::from_bits(self.x.prec());
        let mut i: u64 = 1;
        loop {
            let contribution = self.contribution(&Interval::from_u64(prec, i))?;
            let total = base + &contribution;

            if !total.certainly_ge(upper) {
                return Ok(SearchOutcome {
                    radius: i - 1,
                    last_contribution: contribution,
                });
            }
            if let Some(max) = self.max_radius {
                if i >= max {
                    return Err(LcertError::SearchLimit(max));
                }
            }
            if self.progress_interval > 0 && i % self.progress_interval == 0 {
                debug!(radius = i, total = %total, bound = %upper, "search progress");
            }
            i += 1;
        }
    }
}
