//! L-function families and verification modes

use core::fmt;

use serde::{Deserialize, Serialize};

/// The four supported families. Every formula that differs between them
/// matches on this enum exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LFunctionKind {
    /// ζ(s)
    Riemann,
    /// L(s, χ_d) for a real character of fundamental discriminant `d`
    RealDirichlet { conductor: i64 },
    /// L(s, Δ), the Ramanujan tau L-function (conductor 1)
    Ramanujan,
    /// L(E, s) for the rank-one curve of conductor 37
    Elliptic,
}

impl LFunctionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Riemann => "riemann",
            Self::RealDirichlet { .. } => "dirichlet",
            Self::Ramanujan => "ramanujan",
            Self::Elliptic => "elliptic",
        }
    }

    /// Factor `r` in the prime-sum truncation bound, the degree of the
    /// functional equation.
    pub fn degree(&self) -> u32 {
        match self {
            Self::Riemann | Self::RealDirichlet { .. } => 1,
            Self::Ramanujan | Self::Elliptic => 2,
        }
    }

    /// Only ζ has a digamma oracle and prime sum off the real axis.
    pub fn requires_real_axis(&self) -> bool {
        match self {
            Self::Riemann => false,
            Self::RealDirichlet { .. } | Self::Ramanujan | Self::Elliptic => true,
        }
    }

    /// Real-coefficient families whose zeros come in `±γ` pairs summed as one
    /// term; an adversarial zero is then counted with its mirror.
    pub fn pairs_ordinates(&self) -> bool {
        match self {
            Self::Riemann => false,
            Self::RealDirichlet { .. } | Self::Ramanujan | Self::Elliptic => true,
        }
    }

    /// Only ζ has a tail model for zeros outside the window.
    pub fn has_tail_model(&self) -> bool {
        matches!(self, Self::Riemann)
    }

    /// Coefficient-file literal that contributes nothing to the prime sum.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::Riemann => "1",
            Self::RealDirichlet { .. } | Self::Ramanujan | Self::Elliptic => "0",
        }
    }
}

impl fmt::Display for LFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RealDirichlet { conductor } => write!(f, "dirichlet(d={})", conductor),
            other => f.write_str(other.name()),
        }
    }
}

/// What the counterexample search is trying to rule out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationMode {
    /// zeros off the critical line
    #[default]
    RiemannHypothesis,
    /// zeros missing from the supplied list
    Completeness,
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiemannHypothesis => f.write_str("riemann-hypothesis"),
            Self::Completeness => f.write_str("completeness"),
        }
    }
}
