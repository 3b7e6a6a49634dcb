//! Scroll deltas tagged with their unit.
//!
//! Line deltas come straight from the wheel and are integral. Pixel deltas
//! are what the rest of the system consumes. The two never mix: the only
//! way from one to the other is `transform::lines_to_pixels`.

use serde::{Deserialize, Serialize};

use super::axis::Axis;

/// Hardware-native scroll amount, in wheel lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineDelta {
    pub vertical: i64,
    pub horizontal: i64,
}

impl LineDelta {
    pub const ZERO: Self = Self {
        vertical: 0,
        horizontal: 0,
    };

    pub fn new(vertical: i64, horizontal: i64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.vertical == 0 && self.horizontal == 0
    }

    pub fn component(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }
}

/// Normalized scroll amount, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelDelta {
    pub vertical: f64,
    pub horizontal: f64,
}

impl PixelDelta {
    pub const ZERO: Self = Self {
        vertical: 0.0,
        horizontal: 0.0,
    };

    pub fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Delta with `amount` on `axis` and nothing on the other one
    pub fn along(axis: Axis, amount: f64) -> Self {
        match axis {
            Axis::Vertical => Self::new(amount, 0.0),
            Axis::Horizontal => Self::new(0.0, amount),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.vertical == 0.0 && self.horizontal == 0.0
    }

    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }

    /// Euclidean length of the delta
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.vertical.hypot(self.horizontal)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.vertical * factor, self.horizontal * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_delta_zero() {
        assert!(LineDelta::ZERO.is_zero());
        assert!(LineDelta::default().is_zero());
        assert!(!LineDelta::new(0, -1).is_zero());
    }

    #[test]
    fn test_pixel_delta_along() {
        assert_eq!(PixelDelta::along(Axis::Vertical, 4.0), PixelDelta::new(4.0, 0.0));
        assert_eq!(PixelDelta::along(Axis::Horizontal, -4.0), PixelDelta::new(0.0, -4.0));
    }

    #[test]
    fn test_pixel_delta_magnitude() {
        assert!((PixelDelta::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-9);
        assert!((PixelDelta::new(-30.0, 0.0).magnitude() - 30.0).abs() < 1e-9);
    }
}
