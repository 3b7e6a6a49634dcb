//! Comparison helpers shared by the axis resolver, the motion gate and the
//! phase machine.

use serde::{Deserialize, Serialize};

/// Check whether two deltas point in the same direction.
///
/// Zero has no direction and therefore agrees with everything, so a
/// zero component never counts as a reversal.
#[inline]
pub fn same_sign(n: f64, m: f64) -> bool {
    if n == 0.0 || m == 0.0 {
        return true;
    }
    n.is_sign_negative() == m.is_sign_negative()
}

/// Pointer location in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Fuzzy equality: both coordinates differ by at most `threshold` pixels.
    ///
    /// A threshold of zero degrades to exact equality.
    #[inline]
    pub fn is_about_the_same_as(&self, other: Point, threshold: f64) -> bool {
        (self.x - other.x).abs() <= threshold && (self.y - other.y).abs() <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_sign() {
        assert!(same_sign(3.0, 7.5));
        assert!(same_sign(-1.0, -20.0));
        assert!(!same_sign(-1.0, 2.0));
        assert!(!same_sign(4.0, -0.5));
    }

    #[test]
    fn test_same_sign_zero_agrees_with_anything() {
        assert!(same_sign(0.0, -5.0));
        assert!(same_sign(5.0, 0.0));
        assert!(same_sign(-0.0, 5.0));
    }

    #[test]
    fn test_point_proximity() {
        let origin = Point::new(100.0, 100.0);
        assert!(origin.is_about_the_same_as(Point::new(104.0, 97.0), 5.0));
        assert!(origin.is_about_the_same_as(Point::new(105.0, 95.0), 5.0));
        assert!(!origin.is_about_the_same_as(Point::new(105.5, 100.0), 5.0));
        assert!(!origin.is_about_the_same_as(Point::new(100.0, 90.0), 5.0));
    }

    #[test]
    fn test_point_proximity_zero_threshold() {
        let p = Point::new(1.0, 2.0);
        assert!(p.is_about_the_same_as(p, 0.0));
        assert!(!p.is_about_the_same_as(Point::new(1.0, 2.5), 0.0));
    }
}
