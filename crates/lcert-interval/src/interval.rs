//! Real intervals with outward rounding
//!
//! Every endpoint is an MPFR float. MPFR rounds each elementary operation
//! correctly in the requested direction, so computing the lower endpoint
//! with `Round::Down` and the upper endpoint with `Round::Up` keeps the true
//! value inside `[lo, hi]` through any chain of operations below.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use rug::float::{Constant, Round};
use rug::ops::AssignRound;
use rug::Float;

use crate::error::{IntervalError, Result};
use crate::precision::Precision;

/// Digits used by `Display`.
const DISPLAY_DIGITS: usize = 20;

fn rounded<T>(prec: u32, val: T, round: Round) -> Float
where
    Float: AssignRound<T, Round = Round, Ordering = Ordering>,
{
    Float::with_val_round(prec, val, round).0
}

fn min_float(a: Float, b: Float) -> Float {
    if b < a {
        b
    } else {
        a
    }
}

fn max_float(a: Float, b: Float) -> Float {
    if b > a {
        b
    } else {
        a
    }
}

/// A closed real interval `[lo, hi]` guaranteed to contain some unknown value.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    lo: Float,
    hi: Float,
}

impl Interval {
    /// Parse a decimal literal (`"14.134725"`, `"1e-8"`, `"-1159523"`) or a
    /// ratio of two literals (`"1/2"`), rounding outward.
    pub fn parse(prec: Precision, literal: &str) -> Result<Self> {
        let text = literal.trim();
        if let Some((num, den)) = text.split_once('/') {
            let num = Self::parse(prec, num)?;
            let den = Self::parse(prec, den)?;
            return num.try_div(&den);
        }

        let parse_err = |reason: String| IntervalError::Parse {
            literal: literal.to_string(),
            reason,
        };
        let bits = prec.bits();
        let lo = Float::parse(text).map_err(|e| parse_err(e.to_string()))?;
        let hi = Float::parse(text).map_err(|e| parse_err(e.to_string()))?;
        let lo = rounded(bits, lo, Round::Down);
        let hi = rounded(bits, hi, Round::Up);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(parse_err("not a finite number".into()));
        }
        Ok(Self { lo, hi })
    }

    pub fn from_i64(prec: Precision, value: i64) -> Self {
        Self {
            lo: rounded(prec.bits(), value, Round::Down),
            hi: rounded(prec.bits(), value, Round::Up),
        }
    }

    pub fn from_u64(prec: Precision, value: u64) -> Self {
        Self {
            lo: rounded(prec.bits(), value, Round::Down),
            hi: rounded(prec.bits(), value, Round::Up),
        }
    }

    pub fn zero(prec: Precision) -> Self {
        Self::from_i64(prec, 0)
    }

    pub fn one(prec: Precision) -> Self {
        Self::from_i64(prec, 1)
    }

    /// Enclosure of π.
    pub fn pi(prec: Precision) -> Self {
        Self {
            lo: rounded(prec.bits(), Constant::Pi, Round::Down),
            hi: rounded(prec.bits(), Constant::Pi, Round::Up),
        }
    }

    /// Zero-width interval at an exactly representable value.
    pub fn point(value: Float) -> Self {
        Self {
            lo: value.clone(),
            hi: value,
        }
    }

    pub fn from_bounds(lo: Float, hi: Float) -> Result<Self> {
        if !(lo <= hi) {
            return Err(IntervalError::InvertedBounds {
                lower: lo.to_string(),
                upper: hi.to_string(),
            });
        }
        Ok(Self { lo, hi })
    }

    /// Midpoint-radius form `mid ± rad`, as printed by ball-arithmetic tools.
    pub fn from_midpoint_radius(mid: &Interval, rad: &Interval) -> Self {
        mid.widen(rad)
    }

    pub fn lower(&self) -> &Float {
        &self.lo
    }

    pub fn upper(&self) -> &Float {
        &self.hi
    }

    pub fn prec(&self) -> u32 {
        self.lo.prec().max(self.hi.prec())
    }

    fn working_prec(&self, other: &Interval) -> u32 {
        self.prec().max(other.prec())
    }

    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// True only for the exact zero-width interval `[0, 0]`.
    pub fn is_exact_zero(&self) -> bool {
        self.lo.is_zero() && self.hi.is_zero()
    }

    pub fn contains(&self, value: &Float) -> bool {
        self.lo <= *value && *value <= self.hi
    }

    pub fn contains_zero(&self) -> bool {
        self.lo <= 0 && self.hi >= 0
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.hi < other.lo || other.hi < self.lo)
    }

    /// Every point of `self` is below every point of `other`.
    pub fn certainly_lt(&self, other: &Interval) -> bool {
        self.hi < other.lo
    }

    /// Every point of `self` is at least every point of `other`.
    pub fn certainly_ge(&self, other: &Interval) -> bool {
        self.lo >= other.hi
    }

    pub fn certainly_positive(&self) -> bool {
        self.lo > 0
    }

    pub fn certainly_negative(&self) -> bool {
        self.hi < 0
    }

    /// Upper bound on `hi - lo`.
    pub fn width(&self) -> Float {
        rounded(self.prec(), &self.hi - &self.lo, Round::Up)
    }

    /// `[lo - |e|, hi + |e|]` for every `e` in `err`.
    pub fn widen(&self, err: &Interval) -> Self {
        let prec = self.working_prec(err);
        let radius = err.abs().hi;
        Self {
            lo: rounded(prec, &self.lo - &radius, Round::Down),
            hi: rounded(prec, &self.hi + &radius, Round::Up),
        }
    }

    /// Enclosure of `min(a, b)` over `a ∈ self`, `b ∈ other`.
    pub fn min(&self, other: &Interval) -> Self {
        Self {
            lo: min_float(self.lo.clone(), other.lo.clone()),
            hi: min_float(self.hi.clone(), other.hi.clone()),
        }
    }

    pub fn abs(&self) -> Self {
        if self.lo >= 0 {
            self.clone()
        } else if self.hi <= 0 {
            -self
        } else {
            let neg_lo = -self.lo.clone();
            Self {
                lo: Float::with_val(self.prec(), 0),
                hi: max_float(neg_lo, self.hi.clone()),
            }
        }
    }

    pub fn try_div(&self, rhs: &Interval) -> Result<Self> {
        if rhs.contains_zero() {
            return Err(IntervalError::DivisionByZero(rhs.to_string()));
        }
        let prec = self.working_prec(rhs);
        let mut lo = rounded(prec, &self.lo / &rhs.lo, Round::Down);
        let mut hi = rounded(prec, &self.lo / &rhs.lo, Round::Up);
        for (a, b) in [(&self.lo, &rhs.hi), (&self.hi, &rhs.lo), (&self.hi, &rhs.hi)] {
            lo = min_float(lo, rounded(prec, a / b, Round::Down));
            hi = max_float(hi, rounded(prec, a / b, Round::Up));
        }
        Ok(Self { lo, hi })
    }

    pub fn recip(&self) -> Result<Self> {
        Self::one(Precision::from_bits(self.prec())).try_div(self)
    }

    /// `x²`, tight when the interval straddles zero.
    pub fn sqr(&self) -> Self {
        let prec = self.prec();
        if self.lo >= 0 {
            Self {
                lo: rounded(prec, &self.lo * &self.lo, Round::Down),
                hi: rounded(prec, &self.hi * &self.hi, Round::Up),
            }
        } else if self.hi <= 0 {
            Self {
                lo: rounded(prec, &self.hi * &self.hi, Round::Down),
                hi: rounded(prec, &self.lo * &self.lo, Round::Up),
            }
        } else {
            let lo_sq = rounded(prec, &self.lo * &self.lo, Round::Up);
            let hi_sq = rounded(prec, &self.hi * &self.hi, Round::Up);
            Self {
                lo: Float::with_val(prec, 0),
                hi: max_float(lo_sq, hi_sq),
            }
        }
    }

    pub fn powi(&self, exp: u32) -> Self {
        match exp {
            0 => Self::one(Precision::from_bits(self.prec())),
            1 => self.clone(),
            e if e % 2 == 0 => self.sqr().powi(e / 2),
            e => self * &self.powi(e - 1),
        }
    }

    pub fn ln(&self) -> Result<Self> {
        if !self.certainly_positive() {
            return Err(IntervalError::Domain {
                op: "ln",
                interval: self.to_string(),
            });
        }
        let mut lo = self.lo.clone();
        lo.ln_round(Round::Down);
        let mut hi = self.hi.clone();
        hi.ln_round(Round::Up);
        Ok(Self { lo, hi })
    }

    pub fn exp(&self) -> Self {
        let mut lo = self.lo.clone();
        lo.exp_round(Round::Down);
        let mut hi = self.hi.clone();
        hi.exp_round(Round::Up);
        Self { lo, hi }
    }

    /// `self^exponent` for a positive base.
    pub fn pow(&self, exponent: &Interval) -> Result<Self> {
        Ok((exponent * &self.ln()?).exp())
    }

    /// Digamma on the positive half-line, where ψ is increasing.
    pub fn digamma(&self) -> Result<Self> {
        if !self.certainly_positive() {
            return Err(IntervalError::Domain {
                op: "digamma",
                interval: self.to_string(),
            });
        }
        let mut lo = self.lo.clone();
        lo.digamma_round(Round::Down);
        let mut hi = self.hi.clone();
        hi.digamma_round(Round::Up);
        Ok(Self { lo, hi })
    }

    pub fn cos(&self) -> Self {
        let prec = self.prec();
        let unit = Self {
            lo: Float::with_val(prec, -1),
            hi: Float::with_val(prec, 1),
        };

        // extrema of cos sit at integer multiples of π
        let turns = match self.try_div(&Self::pi(Precision::from_bits(prec))) {
            Ok(turns) => turns,
            Err(_) => return unit,
        };
        if turns.width() >= 2 {
            return unit;
        }

        let mut lo = self.lo.clone();
        lo.cos_round(Round::Down);
        let mut lo_alt = self.hi.clone();
        lo_alt.cos_round(Round::Down);
        let mut hi = self.lo.clone();
        hi.cos_round(Round::Up);
        let mut hi_alt = self.hi.clone();
        hi_alt.cos_round(Round::Up);
        let mut lo = min_float(lo, lo_alt);
        let mut hi = max_float(hi, hi_alt);

        let mut k = turns.lo.clone().ceil();
        while k <= turns.hi {
            let mut half = k.clone();
            half /= 2;
            if half.is_integer() {
                hi = Float::with_val(prec, 1);
            } else {
                lo = Float::with_val(prec, -1);
            }
            k += 1;
        }

        if lo < -1 {
            lo = Float::with_val(prec, -1);
        }
        if hi > 1 {
            hi = Float::with_val(prec, 1);
        }
        Self { lo, hi }
    }

    pub fn sin(&self) -> Self {
        let prec = Precision::from_bits(self.prec());
        let half_pi = Self {
            lo: rounded(prec.bits(), Constant::Pi, Round::Down) / 2u32,
            hi: rounded(prec.bits(), Constant::Pi, Round::Up) / 2u32,
        };
        (self - &half_pi).cos()
    }

    /// Both endpoints with `digits` significant decimal digits, rounded
    /// outward. Formatting never touches the working precision.
    pub fn display_digits(&self, digits: usize) -> String {
        format!(
            "[{}, {}]",
            self.lo.to_string_radix_round(10, Some(digits), Round::Down),
            self.hi.to_string_radix_round(10, Some(digits), Round::Up),
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_digits(DISPLAY_DIGITS))
    }
}

impl<'a, 'b> Add<&'b Interval> for &'a Interval {
    type Output = Interval;

    fn add(self, rhs: &'b Interval) -> Interval {
        let prec = self.working_prec(rhs);
        Interval {
            lo: rounded(prec, &self.lo + &rhs.lo, Round::Down),
            hi: rounded(prec, &self.hi + &rhs.hi, Round::Up),
        }
    }
}

impl<'a, 'b> Sub<&'b Interval> for &'a Interval {
    type Output = Interval;

    fn sub(self, rhs: &'b Interval) -> Interval {
        let prec = self.working_prec(rhs);
        Interval {
            lo: rounded(prec, &self.lo - &rhs.hi, Round::Down),
            hi: rounded(prec, &self.hi - &rhs.lo, Round::Up),
        }
    }
}

impl<'a, 'b> Mul<&'b Interval> for &'a Interval {
    type Output = Interval;

    fn mul(self, rhs: &'b Interval) -> Interval {
        let prec = self.working_prec(rhs);
        let mut lo = rounded(prec, &self.lo * &rhs.lo, Round::Down);
        let mut hi = rounded(prec, &self.lo * &rhs.lo, Round::Up);
        for (a, b) in [(&self.lo, &rhs.hi), (&self.hi, &rhs.lo), (&self.hi, &rhs.hi)] {
            lo = min_float(lo, rounded(prec, a * b, Round::Down));
            hi = max_float(hi, rounded(prec, a * b, Round::Up));
        }
        Interval { lo, hi }
    }
}

impl<'a> Neg for &'a Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval {
            lo: -self.hi.clone(),
            hi: -self.lo.clone(),
        }
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Interval> for Interval {
            type Output = Interval;

            fn $method(self, rhs: Interval) -> Interval {
                (&self).$method(&rhs)
            }
        }

        impl<'b> $imp<&'b Interval> for Interval {
            type Output = Interval;

            fn $method(self, rhs: &'b Interval) -> Interval {
                (&self).$method(rhs)
            }
        }

        impl<'a> $imp<Interval> for &'a Interval {
            type Output = Interval;

            fn $method(self, rhs: Interval) -> Interval {
                self.$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl<'b> AddAssign<&'b Interval> for Interval {
    fn add_assign(&mut self, rhs: &'b Interval) {
        *self = &*self + rhs;
    }
}

impl AddAssign<Interval> for Interval {
    fn add_assign(&mut self, rhs: Interval) {
        *self = &*self + &rhs;
    }
}
