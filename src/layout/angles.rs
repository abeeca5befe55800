//! Angle arithmetic helpers
//!
//! Everything here works on normalized angles in `[0, 2π)`. Angular spans
//! are always taken through normalized (non-negative, mod 2π) differences;
//! raw signed differences break down at the 0/2π wraparound.

use std::f64::consts::{PI, TAU};

/// Spans below this are treated as degenerate and dropped.
pub const SPAN_EPSILON: f64 = 1e-9;

/// Normalize an angle to `[0, 2π)`.
pub fn normalize(theta: f64) -> f64 {
    let t = theta % TAU;
    if t < 0.0 {
        t + TAU
    } else {
        t
    }
}

/// Counter-clockwise delta from `a` to `b`, in `[0, 2π)`.
pub fn ccw_delta(a: f64, b: f64) -> f64 {
    normalize(b - a)
}

/// Circular mean of a set of angles via summed unit vectors, in `[0, 2π)`.
///
/// Returns 0 for an empty set or when the vectors cancel exactly.
pub fn circular_mean(angles: impl IntoIterator<Item = f64>) -> f64 {
    let (mut sin_sum, mut cos_sum) = (0.0, 0.0);
    for theta in angles {
        sin_sum += theta.sin();
        cos_sum += theta.cos();
    }
    if sin_sum.abs() < f64::EPSILON && cos_sum.abs() < f64::EPSILON {
        return 0.0;
    }
    normalize(sin_sum.atan2(cos_sum))
}

/// Shift `angle` by whole turns until it lies within π of `reference`.
///
/// Used before arithmetic-mean angle computations so children straddling the
/// 0/2π boundary average into the correct branch.
pub fn unwrap_around(reference: f64, angle: f64) -> f64 {
    let mut a = angle;
    while a < reference - PI {
        a += TAU;
    }
    while a > reference + PI {
        a -= TAU;
    }
    a
}

/// Circular midpoint traveling counter-clockwise from `a` to `b`.
pub fn midpoint_ccw(a: f64, b: f64) -> f64 {
    normalize(a + ccw_delta(a, b) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_normalize() {
        assert!(close(normalize(0.0), 0.0));
        assert!(close(normalize(TAU), 0.0));
        assert!(close(normalize(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(close(normalize(TAU + PI), PI));
    }

    #[test]
    fn test_ccw_delta_wraps() {
        // From 3π/2 forward through zero to π/2 is half a turn.
        assert!(close(ccw_delta(3.0 * FRAC_PI_2, FRAC_PI_2), PI));
        assert!(close(ccw_delta(FRAC_PI_2, 3.0 * FRAC_PI_2), PI));
        assert!(close(ccw_delta(0.1, 0.3), 0.2));
    }

    #[test]
    fn test_circular_mean_straddling_zero() {
        // 350° and 10° average to 0°, not 180°.
        let mean = circular_mean([normalize(-0.1), 0.1]);
        assert!(close(mean, 0.0));
    }

    #[test]
    fn test_circular_mean_opposite_angles() {
        // Exactly canceling vectors fall back to 0.
        assert!(close(circular_mean([0.0, PI]), 0.0));
    }

    #[test]
    fn test_unwrap_around() {
        assert!(close(unwrap_around(0.1, TAU - 0.1), -0.1));
        assert!(close(unwrap_around(TAU - 0.1, 0.1), TAU + 0.1));
        assert!(close(unwrap_around(PI, PI + 1.0), PI + 1.0));
    }

    #[test]
    fn test_midpoint_ccw() {
        assert!(close(midpoint_ccw(0.0, PI), FRAC_PI_2));
        // Midpoint across the wrap lands at zero.
        assert!(close(midpoint_ccw(3.0 * FRAC_PI_2, FRAC_PI_2), 0.0));
    }
}
