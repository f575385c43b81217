//! Bounds on the zeros of ζ outside the window
//!
//! For a window `[y − τ, y + τ]` around the expansion point, the zeros of
//! ζ with ordinate outside it contribute between `r(x, y, τ)` and
//! `R(x, y, τ)` to the explicit-formula sum. Both come from explicit
//! zero-counting estimates, so the constants below are fixed.

use lcert_interval::{Interval, Precision};

use crate::error::{LcertError, Result};

/// Tail bounds for one `(x, y, τ)`.
#[derive(Clone, Debug)]
pub struct TailBound {
    prec: Precision,
    x: Interval,
    y: Interval,
    tau: Interval,
    /// `y/2`
    c: Interval,
}

impl TailBound {
    /// Requires `y > 0` and `τ > 0`.
    pub fn new(x: &Interval, y: &Interval, tau: &Interval) -> Result<Self> {
        if !y.certainly_positive() {
            return Err(LcertError::InvalidExpansionPoint(format!(
                "the tail bound needs y > 0, got {}",
                y
            )));
        }
        if !tau.certainly_positive() {
            return Err(LcertError::Configuration(format!(
                "the tail bound needs tau > 0, got {}",
                tau
            )));
        }
        let prec = Precision::from_bits(x.prec().max(y.prec()).max(tau.prec()));
        let c = y.try_div(&Interval::from_i64(prec, 2))?;
        Ok(Self {
            prec,
            x: x.clone(),
            y: y.clone(),
            tau: tau.clone(),
            c,
        })
    }

    fn lit(&self, s: &str) -> Result<Interval> {
        Ok(Interval::parse(self.prec, s)?)
    }

    fn int(&self, v: i64) -> Interval {
        Interval::from_i64(self.prec, v)
    }

    /// `1 − 2x`
    fn one_minus_two_x(&self) -> Interval {
        &self.int(1) - &(&self.int(2) * &self.x)
    }

    fn two_y(&self) -> Interval {
        &self.int(2) * &self.y
    }

    /// `y − c`
    fn y_minus_c(&self) -> Interval {
        &self.y - &self.c
    }

    /// `ln(y/(2π))`
    fn log_height(&self) -> Result<Interval> {
        let two_pi = &self.int(2) * &Interval::pi(self.prec);
        Ok(self.y.try_div(&two_pi)?.ln()?)
    }

    pub fn e1(&self) -> Result<Interval> {
        let mut val = self.c.sqr().recip()?;
        val += (&self.y + &self.tau).sqr().recip()?;
        let val = &(&val * &self.lit("0.006")?) * &self.int(4);
        Ok(&val * &Interval::pi(self.prec).sqr())
    }

    pub fn e2(&self) -> Result<Interval> {
        let val = self.one_minus_two_x().try_div(&self.two_y())?;
        Ok(&val * &self.two_y().try_div(&self.c)?.ln()?)
    }

    pub fn e3(&self) -> Result<Interval> {
        let one_minus_x = &self.int(1) - &self.x;
        let val = one_minus_x
            .sqr()
            .try_div(&(&self.int(3) * &self.tau.powi(3)))?;
        let val = val + self.y_minus_c().recip()?;
        Ok(&val * &self.one_minus_two_x())
    }

    pub fn e4(&self) -> Result<Interval> {
        let numer = &self.int(2) - &(&self.int(4) * &self.x);
        let val = numer.try_div(&self.tau.sqr())? + numer.try_div(&self.y_minus_c().sqr())?;
        Ok(&val * &ell(&self.two_y())?)
    }

    pub fn e5(&self) -> Result<Interval> {
        let val = &self.int(4) - &(&self.int(8) * &self.x);
        let val = val.try_div(&self.tau.powi(3))?;
        Ok(&val * &ell1(&self.two_y())?)
    }

    pub fn e6(&self) -> Result<Interval> {
        let outer = &self.two_y() - &self.c;
        let inner = self.y_minus_c();
        let val = &outer.sqr() * &outer.ln()?;
        let val = &val - &(&inner.sqr() * &inner.ln()?);
        let val = val.try_div(&(&Interval::pi(self.prec) * &inner.sqr()))?;
        Ok(&val * &self.one_minus_two_x().try_div(&self.two_y())?)
    }

    /// `(1 − 2x)/(2πτ) · ln(y/(2π))`
    fn leading(&self) -> Result<Interval> {
        let denom = &(&self.int(2) * &Interval::pi(self.prec)) * &self.tau;
        Ok(&self.one_minus_two_x().try_div(&denom)? * &self.log_height()?)
    }

    /// `1/(2π)`
    fn inv_two_pi(&self) -> Result<Interval> {
        Ok((&self.int(2) * &Interval::pi(self.prec)).recip()?)
    }

    /// Error `b` of the lower bound.
    pub fn lower_error(&self) -> Result<Interval> {
        let mut val = &self.one_minus_two_x().try_div(&self.tau)? * &self.e1()?;
        val += self.e2()?;
        val += &self.e3()? * &self.log_height()?;
        let val = &val * &self.inv_two_pi()?;
        Ok(val + (self.e4()? + self.e5()?).try_div(&self.int(2))?)
    }

    /// Error `B` of the upper bound.
    pub fn upper_error(&self) -> Result<Interval> {
        let mut val = &self.one_minus_two_x().try_div(&self.tau)? * &self.e1()?;
        val += self.e2()?;
        let val = &val * &self.inv_two_pi()?;
        let val = val + (self.e4()? + self.e5()?).try_div(&self.int(2))?;
        Ok(val + self.e6()?)
    }

    /// Lower bound `r` on the contribution of zeros outside the window.
    pub fn lower(&self) -> Result<Interval> {
        Ok(self.leading()? - self.lower_error()?)
    }

    /// Upper bound `R` on the contribution of zeros outside the window.
    pub fn upper(&self) -> Result<Interval> {
        Ok(self.leading()? + self.upper_error()?)
    }
}

/// `0.112 ln u + 0.278 ln ln u + 2.510`
pub fn ell(u: &Interval) -> Result<Interval> {
    let prec = Precision::from_bits(u.prec());
    let log_u = u.ln()?;
    let a = &Interval::parse(prec, "0.112")? * &log_u;
    let b = &Interval::parse(prec, "0.278")? * &log_u.ln()?;
    Ok(a + b + Interval::parse(prec, "2.510")?)
}

/// `0.059 ln u + 2.067`
pub fn ell1(u: &Interval) -> Result<Interval> {
    let prec = Precision::from_bits(u.prec());
    Ok(&Interval::parse(prec, "0.059")? * &u.ln()? + Interval::parse(prec, "2.067")?)
}
