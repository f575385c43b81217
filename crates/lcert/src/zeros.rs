//! Certified zero ordinates and windowed lookup

use core::ops::Range;

use lcert_interval::Interval;
use tracing::{debug, warn};

use crate::error::{LcertError, Result};

/// Index range `start..end` into a [`ZeroStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// `self` covers every index of `other`.
    pub fn contains_window(&self, other: &Window) -> bool {
        other.is_empty() || (self.start <= other.start && other.end <= self.end)
    }
}

/// Ascending, immutable sequence of zero-ordinate enclosures.
///
/// Ordering is checked once at construction; nothing mutates the store
/// afterwards, so one store can back any number of verification calls.
#[derive(Clone, Debug, Default)]
pub struct ZeroStore {
    zeros: Vec<Interval>,
}

impl ZeroStore {
    pub fn new(zeros: Vec<Interval>) -> Result<Self> {
        for (i, pair) in zeros.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            if b.lower() < a.lower() || b.upper() < a.upper() {
                return Err(LcertError::Configuration(format!(
                    "zeros must be ascending: #{} {} is followed by #{} {}",
                    i,
                    a,
                    i + 1,
                    b
                )));
            }
        }
        Ok(Self { zeros })
    }

    pub fn len(&self) -> usize {
        self.zeros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zeros.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.zeros.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.zeros.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.zeros
    }

    pub fn window_zeros(&self, window: &Window) -> &[Interval] {
        &self.zeros[window.range()]
    }

    /// Zeros whose whole enclosure lies in `[y - tau, y + tau]`.
    ///
    /// Each boundary is located by binary search. A boundary whose own
    /// enclosure meets a zero's enclosure is ambiguous: that zero could be
    /// on either side, so the call fails instead of guessing. Boundaries
    /// past either end of the data clamp to that end.
    pub fn locate_window(&self, y: &Interval, tau: &Interval) -> Result<Window> {
        if *tau.lower() < 0 {
            return Err(LcertError::Configuration(format!(
                "window radius must be non-negative, got {}",
                tau
            )));
        }

        let lower = y - tau;
        let upper = y + tau;
        let start = self.boundary_index(&lower)?;
        let end = self.boundary_index(&upper)?;

        if end == self.zeros.len() && !self.zeros.is_empty() {
            warn!(
                "window upper boundary {} lies past the last known zero {}",
                upper,
                self.zeros[end - 1]
            );
        }
        debug!("window [{}, {}) of {} zeros", start, end, self.zeros.len());

        Ok(Window { start, end })
    }

    /// First zero not entirely below `boundary`, rejecting overlap.
    fn boundary_index(&self, boundary: &Interval) -> Result<usize> {
        let index = self
            .zeros
            .partition_point(|zero| zero.upper() < boundary.lower());
        match self.zeros.get(index) {
            Some(zero) if zero.overlaps(boundary) => Err(LcertError::AmbiguousBoundary {
                boundary: boundary.to_string(),
                index,
                zero: zero.to_string(),
            }),
            _ => Ok(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcert_interval::Precision;
    use proptest::prelude::*;

    fn p() -> Precision {
        Precision::default()
    }

    fn iv(s: &str) -> Interval {
        Interval::parse(p(), s).unwrap()
    }

    fn store(ordinates: &[&str]) -> ZeroStore {
        let tol = iv("1e-8");
        ZeroStore::new(ordinates.iter().map(|s| iv(s).widen(&tol)).collect()).unwrap()
    }

    fn sample() -> ZeroStore {
        store(&["14.1", "21.0", "25.0", "30.4", "32.9"])
    }

    #[test]
    fn test_rejects_descending() {
        let result = ZeroStore::new(vec![iv("21.0"), iv("14.1")]);
        assert!(matches!(result, Err(LcertError::Configuration(_))));
    }

    #[test]
    fn test_full_window_from_real_axis() {
        let zs = sample();
        let w = zs.locate_window(&iv("0"), &iv("40")).unwrap();
        assert_eq!(w, Window { start: 0, end: 5 });
        assert_eq!(zs.window_zeros(&w).len(), 5);
    }

    #[test]
    fn test_interior_window() {
        let zs = sample();
        // [20, 26] holds 21.0 and 25.0
        let w = zs.locate_window(&iv("23"), &iv("3")).unwrap();
        assert_eq!(w, Window { start: 1, end: 3 });
    }

    #[test]
    fn test_clamps_below_first() {
        let zs = sample();
        let w = zs.locate_window(&iv("0"), &iv("10")).unwrap();
        assert!(w.is_empty());
        assert_eq!(w.start, 0);
    }

    #[test]
    fn test_clamps_past_last() {
        let zs = sample();
        let w = zs.locate_window(&iv("100"), &iv("10")).unwrap();
        assert!(w.is_empty());
        assert_eq!(w.start, 5);
    }

    #[test]
    fn test_ambiguous_boundary() {
        let zs = sample();
        // 25 - 4 = 21.0 sits inside the enclosure of the second zero
        let result = zs.locate_window(&iv("25"), &iv("4"));
        assert!(matches!(
            result,
            Err(LcertError::AmbiguousBoundary { index: 1, .. })
        ));
    }

    #[test]
    fn test_zero_radius_is_empty() {
        let zs = sample();
        let w = zs.locate_window(&iv("23"), &iv("0")).unwrap();
        assert!(w.is_empty());
        assert_eq!(w.start, 2);
    }

    #[test]
    fn test_zero_radius_on_a_zero_is_ambiguous() {
        let zs = sample();
        assert!(zs.locate_window(&iv("25.0"), &iv("0")).is_err());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let zs = sample();
        assert!(matches!(
            zs.locate_window(&iv("23"), &iv("-1")),
            Err(LcertError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_store() {
        let zs = ZeroStore::default();
        let w = zs.locate_window(&iv("10"), &iv("5")).unwrap();
        assert!(w.is_empty());
    }

    proptest! {
        #[test]
        fn prop_window_monotone_in_tau(
            y in 0u32..60,
            tau_small in 0u32..40,
            extra in 0u32..40,
        ) {
            let zs = sample();
            // quarter-integers never coincide with the sample zeros
            let y = iv(&format!("{}.25", y));
            let small = iv(&format!("{}.5", tau_small));
            let large = iv(&format!("{}.5", tau_small + extra));
            if let (Ok(a), Ok(b)) = (zs.locate_window(&y, &small), zs.locate_window(&y, &large)) {
                prop_assert!(b.contains_window(&a));
                prop_assert!(b.len() >= a.len());
            }
        }
    }
}
