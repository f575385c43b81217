//! Expansion point z = x + iy

use lcert_interval::{ComplexInterval, Interval, Precision};

use crate::error::{LcertError, Result};
use crate::kind::LFunctionKind;

/// Expansion point left of the critical strip.
///
/// The decimal literals are kept alongside their enclosures because the
/// external digamma oracle takes its arguments as text.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpansionPoint {
    x_literal: String,
    y_literal: String,
    x: Interval,
    y: Interval,
}

impl ExpansionPoint {
    /// Parse and check `x < 0`, `y >= 0`.
    pub fn parse(prec: Precision, x: &str, y: &str) -> Result<Self> {
        let x_literal = x.trim().to_string();
        let y_literal = y.trim().to_string();
        let x = Interval::parse(prec, &x_literal)?;
        let y = Interval::parse(prec, &y_literal)?;

        if !x.certainly_negative() {
            return Err(LcertError::InvalidExpansionPoint(format!(
                "x must be negative, got {}",
                x_literal
            )));
        }
        if *y.lower() < 0 {
            return Err(LcertError::InvalidExpansionPoint(format!(
                "y must be non-negative, got {}",
                y_literal
            )));
        }

        Ok(Self {
            x_literal,
            y_literal,
            x,
            y,
        })
    }

    pub fn x(&self) -> &Interval {
        &self.x
    }

    pub fn y(&self) -> &Interval {
        &self.y
    }

    pub fn x_literal(&self) -> &str {
        &self.x_literal
    }

    pub fn y_literal(&self) -> &str {
        &self.y_literal
    }

    pub fn on_real_axis(&self) -> bool {
        self.y.is_exact_zero()
    }

    pub fn z(&self) -> ComplexInterval {
        ComplexInterval::new(self.x.clone(), self.y.clone())
    }

    /// Families other than ζ are only supported on the real axis.
    pub fn check_kind(&self, kind: LFunctionKind) -> Result<()> {
        if kind.requires_real_axis() && !self.on_real_axis() {
            return Err(LcertError::InvalidExpansionPoint(format!(
                "{} requires a real expansion point (y = 0), got y = {}",
                kind, self.y_literal
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Precision {
        Precision::default()
    }

    #[test]
    fn test_default_point() {
        let point = ExpansionPoint::parse(p(), "-1", "0").unwrap();
        assert!(point.on_real_axis());
        assert_eq!(point.x_literal(), "-1");
    }

    #[test]
    fn test_x_zero_rejected() {
        assert!(matches!(
            ExpansionPoint::parse(p(), "0", "0"),
            Err(LcertError::InvalidExpansionPoint(_))
        ));
        assert!(matches!(
            ExpansionPoint::parse(p(), "0.5", "10"),
            Err(LcertError::InvalidExpansionPoint(_))
        ));
    }

    #[test]
    fn test_negative_y_rejected() {
        assert!(matches!(
            ExpansionPoint::parse(p(), "-1", "-1"),
            Err(LcertError::InvalidExpansionPoint(_))
        ));
    }

    #[test]
    fn test_off_axis_only_for_riemann() {
        let point = ExpansionPoint::parse(p(), "-2", "100").unwrap();
        assert!(point.check_kind(LFunctionKind::Riemann).is_ok());
        assert!(matches!(
            point.check_kind(LFunctionKind::RealDirichlet { conductor: -4 }),
            Err(LcertError::InvalidExpansionPoint(_))
        ));
        assert!(point.check_kind(LFunctionKind::Elliptic).is_err());
    }

    #[test]
    fn test_garbage_literal() {
        assert!(matches!(
            ExpansionPoint::parse(p(), "minus one", "0"),
            Err(LcertError::Numeric(_))
        ));
    }
}
