//! Approximate key comparison.
//!
//! Two keys closer than the tolerance are considered the same point, and `a`
//! only counts as less than `b` when `b` is larger by more than the tolerance.
//! This relation is not transitive, so trees never use it for their internal
//! layout: nodes are placed by exact key order and the tolerance decides which
//! values a range query or removal matches.

use parkspot_types::Spot;

/// Values with a scalar ordering key.
pub trait Keyed {
    fn key(&self) -> f64;
}

impl Keyed for Spot {
    #[inline]
    fn key(&self) -> f64 {
        Spot::key(self)
    }
}

impl Keyed for f64 {
    #[inline]
    fn key(&self) -> f64 {
        *self
    }
}

/// The ε comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Zero tolerance: `matches` never holds and `less` is strict `<`.
    pub const fn exact() -> Self {
        Self::new(0.0)
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `a < b` iff `b.key - a.key > ε`.
    #[inline]
    pub fn less<A: Keyed + ?Sized, B: Keyed + ?Sized>(&self, a: &A, b: &B) -> bool {
        b.key() - a.key() > self.epsilon
    }

    /// `a == b` iff the keys differ by less than ε.
    #[inline]
    pub fn matches<A: Keyed + ?Sized, B: Keyed + ?Sized>(&self, a: &A, b: &B) -> bool {
        (a.key() - b.key()).abs() < self.epsilon
    }

    /// Neither below `low` nor above `high` under this comparator.
    #[inline]
    pub fn within<V: Keyed + ?Sized>(&self, value: &V, low: f64, high: f64) -> bool {
        !self.less(value, &low) && !self.less(&high, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_less_requires_gap_larger_than_epsilon() {
        let tol = Tolerance::new(5.0);
        assert!(tol.less(&0.0, &5.1));
        assert!(!tol.less(&0.0, &5.0));
        assert!(!tol.less(&0.0, &4.0));
        assert!(!tol.less(&10.0, &0.0));
    }

    #[test]
    fn test_matches_is_strict() {
        let tol = Tolerance::new(5.0);
        assert!(tol.matches(&37.33, &37.32));
        assert!(tol.matches(&10.0, &14.9));
        assert!(!tol.matches(&10.0, &15.0));
    }

    #[test]
    fn test_matching_is_not_transitive() {
        let tol = Tolerance::new(5.0);
        assert!(tol.matches(&0.0, &4.0));
        assert!(tol.matches(&4.0, &8.0));
        assert!(!tol.matches(&0.0, &8.0));
    }

    #[test]
    fn test_within_widens_bounds() {
        let tol = Tolerance::new(1.0);
        assert!(tol.within(&9.5, 10.0, 20.0));
        assert!(tol.within(&21.0, 10.0, 20.0));
        assert!(!tol.within(&8.9, 10.0, 20.0));
        assert!(!tol.within(&21.1, 10.0, 20.0));
    }

    #[test]
    fn test_exact_tolerance() {
        let tol = Tolerance::exact();
        assert!(!tol.matches(&1.0, &1.0));
        assert!(tol.less(&1.0, &1.5));
        assert!(tol.within(&1.0, 1.0, 1.0));
    }
}
