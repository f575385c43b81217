//! End-to-end certification at one expansion point

use lcert_interval::Interval;
use tracing::{info, warn};

use crate::config::VerifierConfig;
use crate::error::{LcertError, Result};
use crate::explicit::{ExplicitFormula, WholeSum};
use crate::kind::{LFunctionKind, VerificationMode};
use crate::oracle::NumericOracle;
use crate::point::ExpansionPoint;
use crate::primes::VonMangoldtSource;
use crate::search::CounterexampleSearch;
use crate::tail::TailBound;
use crate::window_sum::window_sum;
use crate::zeros::{Window, ZeroStore};

/// One certification run.
#[derive(Clone, Debug)]
pub struct VerifyRequest {
    pub point: ExpansionPoint,
    /// half-width of the ordinate window around `y`
    pub tau: Interval,
    /// prime-sum terms to use
    pub terms: usize,
    pub kind: LFunctionKind,
    pub mode: VerificationMode,
    /// add the ζ tail bounds for zeros outside the window
    pub include_tail: bool,
}

/// Tail bounds `r ≤ tail ≤ R`.
#[derive(Clone, Debug, PartialEq)]
pub struct TailContribution {
    pub lower: Interval,
    pub upper: Interval,
}

/// Intermediate quantities of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub kind: LFunctionKind,
    pub mode: VerificationMode,
    pub window: Window,
    /// sum over the window alone
    pub window_sum: Interval,
    pub tail: Option<TailContribution>,
    /// explicit-formula bound and its pieces
    pub bound: WholeSum,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// no zero of the searched kind within `radius` of the expansion point
    Certified { radius: u64, report: Report },
    /// known zeros plus the largest possible tail fall short of the bound,
    /// so the zero list is missing something
    Incomplete { report: Report },
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Self::Certified { report, .. } | Self::Incomplete { report } => report,
        }
    }

    pub fn radius(&self) -> Option<u64> {
        match self {
            Self::Certified { radius, .. } => Some(*radius),
            Self::Incomplete { .. } => None,
        }
    }
}

/// Inputs shared across runs; borrowed, never mutated.
pub struct Verifier<'a> {
    store: &'a ZeroStore,
    source: &'a VonMangoldtSource,
    oracle: &'a dyn NumericOracle,
    config: &'a VerifierConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(
        store: &'a ZeroStore,
        source: &'a VonMangoldtSource,
        oracle: &'a dyn NumericOracle,
        config: &'a VerifierConfig,
    ) -> Self {
        Self {
            store,
            source,
            oracle,
            config,
        }
    }

    fn check(&self, request: &VerifyRequest) -> Result<()> {
        request.point.check_kind(request.kind)?;
        if *request.tau.lower() < 0 {
            return Err(LcertError::Configuration(format!(
                "tau must be non-negative, got {}",
                request.tau
            )));
        }
        Ok(())
    }

    pub fn verify(&self, request: &VerifyRequest) -> Result<Outcome> {
        self.check(request)?;
        let point = &request.point;

        info!(
            kind = %request.kind,
            mode = %request.mode,
            x = point.x_literal(),
            y = point.y_literal(),
            tau = %request.tau,
            terms = request.terms,
            "starting verification"
        );

        let window = self.store.locate_window(point.y(), &request.tau)?;
        info!(start = window.start, end = window.end, "located zero window");

        let bound = ExplicitFormula::new(self.config.precision(), self.oracle).whole_sum(
            point,
            request.terms,
            request.kind,
            self.source,
        )?;
        info!(bound = %bound.total, "explicit formula bound");

        let window_sum = window_sum(
            self.store.window_zeros(&window),
            point.x(),
            point.y(),
            request.kind,
        )?;
        info!(sum = %window_sum, "window sum");

        let with_tail = request.include_tail && request.kind.has_tail_model();
        if request.include_tail && !with_tail {
            warn!(kind = %request.kind, "no tail bound for this family, skipping it");
        }
        let tail = if with_tail {
            let tail = TailBound::new(point.x(), point.y(), &request.tau)?;
            Some(TailContribution {
                lower: tail.lower()?,
                upper: tail.upper()?,
            })
        } else {
            None
        };

        let report = Report {
            kind: request.kind,
            mode: request.mode,
            window,
            window_sum: window_sum.clone(),
            tail,
            bound,
        };

        let mut base = window_sum;
        if let Some(tail) = &report.tail {
            if request.mode == VerificationMode::Completeness {
                let most = &base + &tail.upper;
                if most.certainly_lt(&report.bound.total) {
                    info!(most = %most, bound = %report.bound.total, "zero list is incomplete");
                    return Ok(Outcome::Incomplete { report });
                }
            }
            base += &tail.lower;
        }

        let outcome = CounterexampleSearch::new(point.x(), request.kind, request.mode)
            .with_max_radius(self.config.max_radius)
            .with_progress_interval(self.config.progress_interval)
            .run(&base, &report.bound.total)?;

        info!(radius = outcome.radius, "certified");
        Ok(Outcome::Certified {
            radius: outcome.radius,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{MpfrOracle, StaticOracle};
    use lcert_interval::{ComplexInterval, Precision};

    fn p() -> Precision {
        Precision::default()
    }

    fn iv(s: &str) -> Interval {
        Interval::parse(p(), s).unwrap()
    }

    fn store() -> ZeroStore {
        let tol = iv("1e-8");
        ZeroStore::new(
            ["14.1", "21.0", "25.0", "30.4", "32.9"]
                .iter()
                .map(|s| iv(s).widen(&tol))
                .collect(),
        )
        .unwrap()
    }

    fn precomputed(value: &str) -> VonMangoldtSource {
        VonMangoldtSource::Precomputed {
            value: value.into(),
            error: "1e-20".into(),
        }
    }

    fn high_point_oracle() -> StaticOracle {
        StaticOracle::new().with_riemann("-2", "1000", ComplexInterval::zero(p()))
    }

    fn request(x: &str, y: &str, tau: &str, mode: VerificationMode, tail: bool) -> VerifyRequest {
        VerifyRequest {
            point: ExpansionPoint::parse(p(), x, y).unwrap(),
            tau: iv(tau),
            terms: 100000,
            kind: LFunctionKind::Riemann,
            mode,
            include_tail: tail,
        }
    }

    #[test]
    fn test_tail_skipped_without_tail_model() {
        let zeros = store();
        let source = precomputed("0.4");
        let config = VerifierConfig::default();
        let verifier = Verifier::new(&zeros, &source, &MpfrOracle, &config);
        let mut req = request("-1", "0", "40", VerificationMode::RiemannHypothesis, true);
        req.kind = LFunctionKind::Elliptic;
        let with_flag = verifier.verify(&req).unwrap();
        assert!(with_flag.report().tail.is_none());

        req.include_tail = false;
        assert_eq!(verifier.verify(&req).unwrap(), with_flag);
    }

    #[test]
    fn test_tail_requires_positive_height() {
        let zeros = store();
        let source = precomputed("0.4");
        let config = VerifierConfig::default();
        let verifier = Verifier::new(&zeros, &source, &MpfrOracle, &config);
        let req = request("-1", "0", "40", VerificationMode::RiemannHypothesis, true);
        assert!(matches!(
            verifier.verify(&req),
            Err(LcertError::InvalidExpansionPoint(_))
        ));
    }

    #[test]
    fn test_incomplete_when_tail_cannot_reach_bound() {
        let zeros = store();
        let source = precomputed("5");
        let config = VerifierConfig::default();
        let oracle = high_point_oracle();
        let verifier = Verifier::new(&zeros, &source, &oracle, &config);
        let req = request("-2", "1000", "100", VerificationMode::Completeness, true);

        let outcome = verifier.verify(&req).unwrap();
        assert!(matches!(outcome, Outcome::Incomplete { .. }));
        assert_eq!(outcome.radius(), None);
        assert!(outcome.report().window.is_empty());
    }

    #[test]
    fn test_certified_with_tail() {
        let zeros = store();
        // bound = -ln(pi)/2 + 1.0724, about 0.50004
        let source = precomputed("1.0724");
        let config = VerifierConfig::default();
        let oracle = high_point_oracle();
        let verifier = Verifier::new(&zeros, &source, &oracle, &config);
        let req = request("-2", "1000", "100", VerificationMode::RiemannHypothesis, true);

        // r ~ 0.0296: base + contribution is ~0.510 at 2 and ~0.350 at 3
        let outcome = verifier.verify(&req).unwrap();
        assert_eq!(outcome.radius(), Some(2));
        let tail = outcome.report().tail.as_ref().unwrap();
        assert!(tail.lower.certainly_lt(&tail.upper));
    }

    #[test]
    fn test_completeness_with_tail_reaching_bound_searches() {
        let zeros = store();
        // bound about 0.050, below base + R
        let source = precomputed("0.6224");
        let config = VerifierConfig::default();
        let oracle = high_point_oracle();
        let verifier = Verifier::new(&zeros, &source, &oracle, &config);
        let req = request("-2", "1000", "100", VerificationMode::Completeness, true);
        let outcome = verifier.verify(&req).unwrap();
        assert!(matches!(outcome, Outcome::Certified { radius, .. } if radius > 0));
    }
}
