//! Contribution of the known zeros inside the window

use lcert_interval::{Interval, Precision};

use crate::error::Result;
use crate::kind::LFunctionKind;

/// Sum of `Re 1/(z − ρ)` over the zeros `ρ = ½ + iγ` in `zeros`.
///
/// For ζ each ordinate is one zero. The other families have real
/// coefficients, so `γ` stands for the pair `±γ` and contributes
/// `(1 − 2x)/((½ − x)² + γ²)`; a central zero `γ = 0` is counted once.
pub fn window_sum(
    zeros: &[Interval],
    x: &Interval,
    y: &Interval,
    kind: LFunctionKind,
) -> Result<Interval> {
    let prec = Precision::from_bits(x.prec());
    let half = Interval::parse(prec, "1/2")?;
    let shift = &half - x;
    let shift_sq = shift.sqr();
    let mut sum = Interval::zero(prec);

    match kind {
        LFunctionKind::Riemann => {
            for gamma in zeros {
                let denom = &shift_sq + &(gamma - y).sqr();
                sum += shift.try_div(&denom)?;
            }
        }
        LFunctionKind::RealDirichlet { .. } | LFunctionKind::Ramanujan | LFunctionKind::Elliptic => {
            let numer = &Interval::one(prec) - &(&Interval::from_i64(prec, 2) * x);
            for gamma in zeros {
                if gamma.is_exact_zero() {
                    sum += shift.try_div(&shift_sq)?;
                } else {
                    let denom = &shift_sq + &gamma.sqr();
                    sum += numer.try_div(&denom)?;
                }
            }
        }
    }

    Ok(sum)
}
