//! Upper bound from the explicit formula
//!
//! The real part of `log term + digamma term + prime sum`, widened by the
//! truncation error of the prime sum after `N` terms.

use lcert_interval::{ComplexInterval, Interval, Precision};
use tracing::debug;

use crate::error::{LcertError, Result};
use crate::kind::LFunctionKind;
use crate::oracle::NumericOracle;
use crate::point::ExpansionPoint;
use crate::primes::{Coefficient, Encoding, PrimeTable, VonMangoldtSource};

/// Constant of the prime-sum truncation bound.
const TRUNCATION_CONSTANT: &str = "2.85";

/// Each piece of the explicit formula, real parts only.
#[derive(Clone, Debug, PartialEq)]
pub struct WholeSum {
    pub log_term: Interval,
    pub digamma_term: Interval,
    pub prime_term: Interval,
    pub error_term: Interval,
    /// `log + digamma + prime`, widened by `|error_term|`
    pub total: Interval,
}

/// Evaluator bound to a precision and a digamma oracle.
pub struct ExplicitFormula<'a> {
    prec: Precision,
    oracle: &'a dyn NumericOracle,
}

impl<'a> ExplicitFormula<'a> {
    pub fn new(prec: Precision, oracle: &'a dyn NumericOracle) -> Self {
        Self { prec, oracle }
    }

    fn lit(&self, s: &str) -> Result<Interval> {
        Ok(Interval::parse(self.prec, s)?)
    }

    /// Conductor and gamma-factor normalisation.
    pub fn log_term(&self, kind: LFunctionKind) -> Result<Interval> {
        let half = self.lit("1/2")?;
        let log_pi = Interval::pi(self.prec).ln()?;
        let term = match kind {
            LFunctionKind::Riemann => -(&half * &log_pi),
            LFunctionKind::RealDirichlet { conductor } => {
                if conductor == 0 {
                    return Err(LcertError::Configuration(
                        "dirichlet discriminant must be non-zero".into(),
                    ));
                }
                let d = Interval::from_u64(self.prec, conductor.unsigned_abs());
                &half * &d.ln()? - &half * &log_pi
            }
            LFunctionKind::Ramanujan => &half * &Interval::one(self.prec).ln()? - &log_pi,
            LFunctionKind::Elliptic => {
                &half * &Interval::from_i64(self.prec, 37).ln()? - &log_pi
            }
        };
        Ok(term)
    }

    /// Half the digamma value(s) at the family's shifted arguments.
    pub fn digamma_term(
        &self,
        kind: LFunctionKind,
        point: &ExpansionPoint,
    ) -> Result<ComplexInterval> {
        point.check_kind(kind)?;
        let x = point.x_literal();
        let value = match kind {
            LFunctionKind::Riemann => {
                self.oracle
                    .riemann_digamma(self.prec, x, point.y_literal())?
            }
            LFunctionKind::RealDirichlet { conductor } => {
                let shift = if conductor > 0 { "0" } else { "1" };
                ComplexInterval::from_real(self.oracle.shifted_digamma(self.prec, x, shift)?)
            }
            LFunctionKind::Ramanujan => ComplexInterval::from_real(self.shifted_pair(x, "5.5", "6.5")?),
            LFunctionKind::Elliptic => ComplexInterval::from_real(self.shifted_pair(x, "0.5", "1.5")?),
        };
        Ok(value.scale(&self.lit("1/2")?))
    }

    fn shifted_pair(&self, x: &str, m1: &str, m2: &str) -> Result<Interval> {
        let a = self.oracle.shifted_digamma(self.prec, x, m1)?;
        let b = self.oracle.shifted_digamma(self.prec, x, m2)?;
        Ok(a + b)
    }

    /// Prime-power sum truncated after `terms` coefficients.
    pub fn von_mangoldt_term(
        &self,
        terms: usize,
        point: &ExpansionPoint,
        kind: LFunctionKind,
        source: &VonMangoldtSource,
    ) -> Result<ComplexInterval> {
        match source {
            VonMangoldtSource::Precomputed { value, error } => {
                let value = self.lit(value)?;
                let error = self.lit(error)?;
                Ok(ComplexInterval::from_real(value.widen(&error)))
            }
            VonMangoldtSource::Table(table) => {
                if table.encoding() != Encoding::for_kind(kind) {
                    return Err(LcertError::Configuration(format!(
                        "{:?} coefficient table cannot be used for {}",
                        table.encoding(),
                        kind
                    )));
                }
                if terms > table.len() {
                    return Err(LcertError::InsufficientData(format!(
                        "{} prime-sum terms requested, table has {}",
                        terms,
                        table.len()
                    )));
                }
                match kind {
                    LFunctionKind::Riemann => self.riemann_prime_sum(terms, point, table),
                    _ => {
                        point.check_kind(kind)?;
                        Ok(ComplexInterval::from_real(
                            self.direct_prime_sum(terms, point, table)?,
                        ))
                    }
                }
            }
        }
    }

    /// `−Σ log(aₙ) n^{−(1−z)} − 1/z`
    fn riemann_prime_sum(
        &self,
        terms: usize,
        point: &ExpansionPoint,
        table: &PrimeTable,
    ) -> Result<ComplexInterval> {
        let exponent = point.x() - &Interval::one(self.prec);
        let mut sum = ComplexInterval::zero(self.prec);

        for (n, coefficient) in table.first(terms) {
            let Coefficient::Value(literal) = coefficient else {
                continue;
            };
            let weight = self.lit(literal)?.ln()?;
            let log_n = Interval::from_u64(self.prec, n).ln()?;
            let magnitude = (&exponent * &log_n).exp();
            let term = if point.on_real_axis() {
                ComplexInterval::from_real(&weight * &magnitude)
            } else {
                // n^{iy} = cis(y log n)
                ComplexInterval::cis(&(point.y() * &log_n)).scale(&(&weight * &magnitude))
            };
            sum = sum + term;
        }

        Ok(-&sum - point.z().recip()?)
    }

    /// `−Σ aₙ n^{x−1}` on the real axis.
    fn direct_prime_sum(
        &self,
        terms: usize,
        point: &ExpansionPoint,
        table: &PrimeTable,
    ) -> Result<Interval> {
        let exponent = point.x() - &Interval::one(self.prec);
        let mut sum = Interval::zero(self.prec);

        for (n, coefficient) in table.first(terms) {
            let Coefficient::Value(literal) = coefficient else {
                continue;
            };
            let a = self.lit(literal)?;
            sum += &a * &Interval::from_u64(self.prec, n).pow(&exponent)?;
        }

        Ok(-sum)
    }

    /// `r · (Nˣ/x) · (2.85 · (2x − 1)/ln N − 1)` with `r` the degree.
    pub fn error_term(&self, terms: usize, x: &Interval, kind: LFunctionKind) -> Result<Interval> {
        if terms < 2 {
            return Err(LcertError::Configuration(format!(
                "at least 2 prime-sum terms are needed, got {}",
                terms
            )));
        }
        let r = Interval::from_u64(self.prec, kind.degree() as u64);
        let n = Interval::from_u64(self.prec, terms as u64);
        let log_n = n.ln()?;
        let one = Interval::one(self.prec);
        let two = Interval::from_i64(self.prec, 2);

        let first = (&r * &n.pow(x)?).try_div(x)?;
        let second = &self.lit(TRUNCATION_CONSTANT)? * &(&(&two * x) - &one).try_div(&log_n)?;
        Ok(&first * &(&second - &one))
    }

    /// Real part of the explicit formula at `point`, with every piece.
    pub fn whole_sum(
        &self,
        point: &ExpansionPoint,
        terms: usize,
        kind: LFunctionKind,
        source: &VonMangoldtSource,
    ) -> Result<WholeSum> {
        point.check_kind(kind)?;
        let error_term = self.error_term(terms, point.x(), kind)?;
        let log_term = self.log_term(kind)?;
        let digamma_term = self.digamma_term(kind, point)?.into_re();
        let prime_term = self.von_mangoldt_term(terms, point, kind, source)?.into_re();

        let sum = &(&log_term + &digamma_term) + &prime_term;
        let total = sum.widen(&error_term);

        debug!(
            log = %log_term,
            digamma = %digamma_term,
            prime = %prime_term,
            error = %error_term,
            "explicit formula terms"
        );

        Ok(WholeSum {
            log_term,
            digamma_term,
            prime_term,
            error_term,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{MpfrOracle, StaticOracle};
    use lcert_interval::Float;

    fn p() -> Precision {
        Precision::default()
    }

    fn iv(s: &str) -> Interval {
        Interval::parse(p(), s).unwrap()
    }

    fn exact(s: &str) -> Float {
        Float::with_val(512, Float::parse(s).unwrap())
    }

    fn point(x: &str, y: &str) -> ExpansionPoint {
        ExpansionPoint::parse(p(), x, y).unwrap()
    }

    fn sentinels(encoding: Encoding, n: usize) -> VonMangoldtSource {
        VonMangoldtSource::Table(PrimeTable::from_literals(
            encoding,
            std::iter::repeat(encoding.sentinel()).take(n),
        ))
    }

    #[test]
    fn test_log_terms() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        // -ln(pi)/2
        let riemann = f.log_term(LFunctionKind::Riemann).unwrap();
        assert!(riemann.contains(&exact("-0.57236494292470008707171367567652935582365")));
        // ln(37)/2 - ln(pi)
        let elliptic = f.log_term(LFunctionKind::Elliptic).unwrap();
        assert!(elliptic.contains(&exact("0.66072907047271204804062048416266487030274")));
        assert!(f
            .log_term(LFunctionKind::RealDirichlet { conductor: 0 })
            .is_err());
    }

    #[test]
    fn test_dirichlet_log_uses_abs_conductor() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let neg = f.log_term(LFunctionKind::RealDirichlet { conductor: -4 }).unwrap();
        let pos = f.log_term(LFunctionKind::RealDirichlet { conductor: 4 }).unwrap();
        assert_eq!(neg, pos);
    }

    #[test]
    fn test_digamma_term_riemann_real_axis() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let v = f.digamma_term(LFunctionKind::Riemann, &point("-1", "0")).unwrap();
        // psi(2)/2
        assert!(v.re().contains(&exact("0.2113921675492335696967439549587987844789")));
    }

    #[test]
    fn test_digamma_term_shift_selection() {
        let one = iv("1");
        let oracle = StaticOracle::new()
            .with_shifted("-1", "1", one.clone())
            .with_shifted("-1", "5.5", one.clone())
            .with_shifted("-1", "6.5", iv("3"));
        let f = ExplicitFormula::new(p(), &oracle);
        let x = point("-1", "0");

        // negative discriminant uses m = 1
        let d = f
            .digamma_term(LFunctionKind::RealDirichlet { conductor: -3 }, &x)
            .unwrap();
        assert!(d.re().contains(&exact("0.5")));
        // positive discriminant asks for m = 0, which the oracle lacks
        assert!(f
            .digamma_term(LFunctionKind::RealDirichlet { conductor: 5 }, &x)
            .is_err());

        let tau = f.digamma_term(LFunctionKind::Ramanujan, &x).unwrap();
        assert!(tau.re().contains(&exact("2")));
    }

    #[test]
    fn test_riemann_prime_sum_sentinels_only() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let z = point("-1", "0");
        let v = f
            .von_mangoldt_term(10, &z, LFunctionKind::Riemann, &sentinels(Encoding::ExpLambda, 10))
            .unwrap();
        // only -1/z remains
        assert!(v.re().contains(&exact("1")));
        assert!(v.re().width() < 1e-35);
    }

    #[test]
    fn test_riemann_prime_sum_first_terms() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let z = point("-1", "0");
        let table = PrimeTable::from_literals(Encoding::ExpLambda, ["1", "2", "3", "2"]);
        let v = f
            .von_mangoldt_term(4, &z, LFunctionKind::Riemann, &VonMangoldtSource::Table(table))
            .unwrap();
        // 1 - (ln2/4 + ln3/9 + ln2/16)
        let expected = exact("0.66132347400078268065208771349737252196001");
        assert!(v.re().contains(&expected));
    }

    #[test]
    fn test_riemann_prime_sum_off_axis_imaginary_part() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let z = point("-1", "2");
        let v = f
            .von_mangoldt_term(3, &z, LFunctionKind::Riemann, &sentinels(Encoding::ExpLambda, 3))
            .unwrap();
        // -1/(-1 + 2i) = (1 + 2i)/5
        assert!(v.re().contains(&exact("0.2")));
        assert!(v.im().contains(&exact("0.4")));
    }

    #[test]
    fn test_direct_prime_sum() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let z = point("-1", "0");
        let table = PrimeTable::from_literals(Encoding::Direct, ["0", "-1", "0", "4"]);
        let v = f
            .von_mangoldt_term(4, &z, LFunctionKind::Elliptic, &VonMangoldtSource::Table(table))
            .unwrap();
        // -(-1/4 + 4/16) = 0
        assert!(v.re().contains(&exact("0")));
        assert!(v.im().is_exact_zero());
    }

    #[test]
    fn test_precomputed_source() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let source = VonMangoldtSource::Precomputed {
            value: "0.4".into(),
            error: "1e-20".into(),
        };
        let v = f
            .von_mangoldt_term(100000, &point("-1", "0"), LFunctionKind::Riemann, &source)
            .unwrap();
        assert!(v.re().contains(&exact("0.4")));
        assert!(v.re().width() > 1.9e-20);
    }

    #[test]
    fn test_insufficient_terms() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let result = f.von_mangoldt_term(
            11,
            &point("-1", "0"),
            LFunctionKind::Riemann,
            &sentinels(Encoding::ExpLambda, 10),
        );
        assert!(matches!(result, Err(LcertError::InsufficientData(_))));
    }

    #[test]
    fn test_wrong_encoding_rejected() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let result = f.von_mangoldt_term(
            5,
            &point("-1", "0"),
            LFunctionKind::Ramanujan,
            &sentinels(Encoding::ExpLambda, 10),
        );
        assert!(matches!(result, Err(LcertError::Configuration(_))));
    }

    #[test]
    fn test_error_term() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let x = iv("-1");
        // (10^-1/-1) * (2.85 * (-3/ln 10) - 1)
        let e = f.error_term(10, &x, LFunctionKind::Riemann).unwrap();
        assert!(e.contains(&exact("0.47132178202728031264171522567369734536170")));
        // degree two doubles it
        let e2 = f.error_term(10, &x, LFunctionKind::Ramanujan).unwrap();
        assert!(e2.contains(&exact("0.94264356405456062528343045134739469072341")));
    }

    #[test]
    fn test_error_term_needs_two_terms() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        assert!(matches!(
            f.error_term(1, &iv("-1"), LFunctionKind::Riemann),
            Err(LcertError::Configuration(_))
        ));
    }

    #[test]
    fn test_whole_sum_encloses_reference() {
        let f = ExplicitFormula::new(p(), &MpfrOracle);
        let sum = f
            .whole_sum(
                &point("-1", "0"),
                100000,
                LFunctionKind::Riemann,
                &sentinels(Encoding::ExpLambda, 100000),
            )
            .unwrap();
        assert!(sum.total.lower().to_f64() > 0.639009);
        assert!(sum.total.upper().to_f64() < 0.639045);
    }
}
