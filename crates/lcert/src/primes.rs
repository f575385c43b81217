//! Prime-power coefficient data for the explicit formula

use crate::kind::LFunctionKind;

/// One line of a coefficient file, term `n` on line `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coefficient {
    /// the family's sentinel literal; contributes nothing
    Sentinel,
    /// decimal literal, parsed into an interval at summation time
    Value(String),
}

/// How the literals in a table are to be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// `e^Λ(n)` for ζ; the term is `log(value)` and `"1"` is the sentinel
    ExpLambda,
    /// the coefficient itself; `"0"` is the sentinel
    Direct,
}

impl Encoding {
    pub fn for_kind(kind: LFunctionKind) -> Self {
        match kind {
            LFunctionKind::Riemann => Self::ExpLambda,
            LFunctionKind::RealDirichlet { .. }
            | LFunctionKind::Ramanujan
            | LFunctionKind::Elliptic => Self::Direct,
        }
    }

    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::ExpLambda => "1",
            Self::Direct => "0",
        }
    }
}

/// Coefficients for terms `1..=len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeTable {
    encoding: Encoding,
    terms: Vec<Coefficient>,
}

impl PrimeTable {
    /// Classify raw literals against the encoding's sentinel.
    pub fn from_literals<I, S>(encoding: Encoding, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sentinel = encoding.sentinel();
        let terms = literals
            .into_iter()
            .map(|lit| {
                let lit = lit.as_ref().trim();
                if lit == sentinel {
                    Coefficient::Sentinel
                } else {
                    Coefficient::Value(lit.to_string())
                }
            })
            .collect();
        Self { encoding, terms }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// First `n` terms paired with their 1-based index.
    pub fn first(&self, n: usize) -> impl Iterator<Item = (u64, &Coefficient)> {
        self.terms.iter().take(n).enumerate().map(|(i, c)| (i as u64 + 1, c))
    }
}

/// Where the prime-sum term of the explicit formula comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VonMangoldtSource {
    /// sum the first `N` coefficients
    Table(PrimeTable),
    /// a value computed elsewhere, with its absolute error
    Precomputed { value: String, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riemann_sentinel_classification() {
        let table = PrimeTable::from_literals(Encoding::ExpLambda, ["1", "2", "3", "2", "5", "1"]);
        assert_eq!(table.len(), 6);
        let sentinels = table
            .first(6)
            .filter(|(_, c)| **c == Coefficient::Sentinel)
            .count();
        assert_eq!(sentinels, 2);
    }

    #[test]
    fn test_direct_sentinel_is_zero() {
        let table = PrimeTable::from_literals(Encoding::Direct, ["0", " -0.5 ", "1"]);
        let terms: Vec<_> = table.first(3).collect();
        assert_eq!(terms[0], (1, &Coefficient::Sentinel));
        assert_eq!(terms[1], (2, &Coefficient::Value("-0.5".into())));
        assert_eq!(terms[2], (3, &Coefficient::Value("1".into())));
    }

    #[test]
    fn test_encoding_for_kind() {
        assert_eq!(Encoding::for_kind(LFunctionKind::Riemann), Encoding::ExpLambda);
        assert_eq!(Encoding::for_kind(LFunctionKind::Ramanujan), Encoding::Direct);
    }

    #[test]
    fn test_first_truncates() {
        let table = PrimeTable::from_literals(Encoding::Direct, ["1"; 10]);
        assert_eq!(table.first(4).count(), 4);
        assert_eq!(table.first(40).count(), 10);
    }
}
