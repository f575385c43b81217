//! Rectangular complex intervals

use core::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;
use crate::interval::Interval;
use crate::precision::Precision;

/// `re + i·im` with both parts enclosed independently.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexInterval {
    re: Interval,
    im: Interval,
}

impl ComplexInterval {
    pub fn new(re: Interval, im: Interval) -> Self {
        Self { re, im }
    }

    pub fn from_real(re: Interval) -> Self {
        let im = Interval::zero(Precision::from_bits(re.prec()));
        Self { re, im }
    }

    pub fn zero(prec: Precision) -> Self {
        Self::new(Interval::zero(prec), Interval::zero(prec))
    }

    /// `cos θ + i sin θ`
    pub fn cis(theta: &Interval) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    pub fn re(&self) -> &Interval {
        &self.re
    }

    pub fn im(&self) -> &Interval {
        &self.im
    }

    pub fn into_re(self) -> Interval {
        self.re
    }

    pub fn scale(&self, factor: &Interval) -> Self {
        Self::new(&self.re * factor, &self.im * factor)
    }

    /// `|z|²`, an enclosure of a non-negative real.
    pub fn norm_sqr(&self) -> Interval {
        self.re.sqr() + self.im.sqr()
    }

    /// `1/z = conj(z) / |z|²`
    pub fn recip(&self) -> Result<Self> {
        let norm = self.norm_sqr();
        Ok(Self::new(self.re.try_div(&norm)?, (-&self.im).try_div(&norm)?))
    }
}

impl<'a, 'b> Add<&'b ComplexInterval> for &'a ComplexInterval {
    type Output = ComplexInterval;

    fn add(self, rhs: &'b ComplexInterval) -> ComplexInterval {
        ComplexInterval::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl<'a, 'b> Sub<&'b ComplexInterval> for &'a ComplexInterval {
    type Output = ComplexInterval;

    fn sub(self, rhs: &'b ComplexInterval) -> ComplexInterval {
        ComplexInterval::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl<'a, 'b> Mul<&'b ComplexInterval> for &'a ComplexInterval {
    type Output = ComplexInterval;

    fn mul(self, rhs: &'b ComplexInterval) -> ComplexInterval {
        let re = &(&self.re * &rhs.re) - &(&self.im * &rhs.im);
        let im = &(&self.re * &rhs.im) + &(&self.im * &rhs.re);
        ComplexInterval::new(re, im)
    }
}

impl<'a> Neg for &'a ComplexInterval {
    type Output = ComplexInterval;

    fn neg(self) -> ComplexInterval {
        ComplexInterval::new(-&self.re, -&self.im)
    }
}

impl Add for ComplexInterval {
    type Output = ComplexInterval;

    fn add(self, rhs: ComplexInterval) -> ComplexInterval {
        &self + &rhs
    }
}

impl Sub for ComplexInterval {
    type Output = ComplexInterval;

    fn sub(self, rhs: ComplexInterval) -> ComplexInterval {
        &self - &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: &str) -> Interval {
        Interval::parse(Precision::default(), s).unwrap()
    }

    #[test]
    fn test_mul_i_squared() {
        let p = Precision::default();
        let i = ComplexInterval::new(Interval::zero(p), Interval::one(p));
        let sq = &i * &i;
        assert!(sq.re().contains(&rug::Float::with_val(64, -1)));
        assert!(sq.im().is_exact_zero());
    }

    #[test]
    fn test_recip_of_negative_real() {
        let z = ComplexInterval::from_real(iv("-1"));
        let inv = z.recip().unwrap();
        assert!(inv.re().contains(&rug::Float::with_val(64, -1)));
        assert!(inv.im().contains_zero());
    }

    #[test]
    fn test_cis_zero_is_one() {
        let c = ComplexInterval::cis(&iv("0"));
        assert_eq!(c.re().upper().to_f64(), 1.0);
        assert!(c.im().contains_zero());
    }

    #[test]
    fn test_recip_of_zero_fails() {
        assert!(ComplexInterval::zero(Precision::default()).recip().is_err());
    }
}
