//! Working precision context

/// log2(10), used to turn decimal digits into mantissa bits.
const LOG2_10: f64 = 3.321_928_094_887_362_6;

/// Smallest precision we hand to MPFR. Anything lower makes the
/// decimal constants in the explicit formula meaningless.
const MIN_BITS: u32 = 16;

/// Mantissa precision for every endpoint created from a literal.
///
/// There is no process-wide precision: a `Precision` is passed to every
/// constructor that turns text or integers into an [`Interval`](crate::Interval).
/// Operations on existing intervals run at the larger of the operands'
/// precisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision(u32);

impl Precision {
    /// 40 significant decimal digits, 136 bits.
    pub const DEFAULT_DIGITS: u32 = 40;

    pub fn from_bits(bits: u32) -> Self {
        Self(bits.max(MIN_BITS))
    }

    /// Bits needed to carry `digits` decimal digits plus one guard digit.
    pub fn from_digits(digits: u32) -> Self {
        let bits = ((digits as f64 + 1.0) * LOG2_10).round() as u32;
        Self::from_bits(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::from_digits(Self::DEFAULT_DIGITS)
    }
}
