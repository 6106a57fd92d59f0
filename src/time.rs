//! Simulated clock values and tolerant comparisons.
//!
//! Every arrival, remaining-time and segment-adjacency check in the crate
//! goes through these helpers so all policies break ties identically.

use std::cmp::Ordering;

/// Simulated time, in abstract time units
pub type SimTime = f64;

/// Tolerance for all floating comparisons on the simulated clock
pub const EPSILON: f64 = 1e-9;

/// `a` and `b` are the same instant
pub fn approx_eq(a: SimTime, b: SimTime) -> bool {
    (a - b).abs() < EPSILON
}

/// `t` is at or before `now`
pub fn at_or_before(t: SimTime, now: SimTime) -> bool {
    t <= now + EPSILON
}

/// `t` is strictly after `now`
pub fn strictly_after(t: SimTime, now: SimTime) -> bool {
    t > now + EPSILON
}

/// Remaining work is used up
pub fn is_exhausted(remaining: SimTime) -> bool {
    remaining <= EPSILON
}

/// Total order on clock values that treats near-equal values as equal
pub fn cmp_approx(a: SimTime, b: SimTime) -> Ordering {
    if approx_eq(a, b) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_values_compare_equal() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert_eq!(cmp_approx(0.1 + 0.2, 0.3), Ordering::Equal);
        assert_eq!(cmp_approx(1.0, 2.0), Ordering::Less);
        assert_eq!(cmp_approx(2.0, 1.0), Ordering::Greater);
    }

    #[test]
    fn arrival_windows() {
        assert!(at_or_before(5.0, 5.0 - 1e-12));
        assert!(!strictly_after(5.0, 5.0 - 1e-12));
        assert!(strictly_after(5.1, 5.0));
        assert!(is_exhausted(1e-10));
        assert!(!is_exhausted(0.1));
    }
}
