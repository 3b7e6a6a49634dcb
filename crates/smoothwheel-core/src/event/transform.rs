//! Pure event transforms.
//!
//! None of these keep state and all of them preserve the phase of the
//! event they are given.

use serde::{Deserialize, Serialize};

use super::axis::{Axis, AxisMask};
use super::delta::{LineDelta, PixelDelta};
use super::{RawScrollEvent, ScrollEvent, ScrollPhase};
use crate::{Error, Result};

/// Scroll direction preference for a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Natural,
    Inverted,
}

pub(crate) fn check_line_height(line_height: f64) -> Result<()> {
    if !line_height.is_finite() || line_height <= 0.0 {
        return Err(Error::Config(format!(
            "line height must be a positive number of pixels, got {}",
            line_height
        )));
    }
    Ok(())
}

/// Scale a line delta to pixels
pub fn lines_to_pixels(delta: LineDelta, line_height: f64) -> Result<PixelDelta> {
    check_line_height(line_height)?;
    Ok(PixelDelta::new(
        delta.vertical as f64 * line_height,
        delta.horizontal as f64 * line_height,
    ))
}

/// Build a pixel-resolution event from a line-resolution one
pub fn build_pixel_event(raw: &RawScrollEvent, line_height: f64) -> Result<ScrollEvent> {
    let delta = lines_to_pixels(raw.delta, line_height)?;
    Ok(ScrollEvent::new(raw.phase, delta))
}

/// One-notch event carrying exactly `pixel_value` on `axis`
pub fn normalized_event(pixel_value: f64, axis: Axis) -> Result<ScrollEvent> {
    if !pixel_value.is_finite() || pixel_value == 0.0 {
        return Err(Error::Config(format!(
            "normalized pixel value must be nonzero, got {}",
            pixel_value
        )));
    }
    Ok(ScrollEvent::new(
        ScrollPhase::None,
        PixelDelta::along(axis, pixel_value),
    ))
}

/// Negate the components selected by `mask`
pub fn invert(event: &ScrollEvent, mask: AxisMask) -> ScrollEvent {
    let mut delta = event.delta();
    if mask.includes(Axis::Vertical) {
        delta.vertical = -delta.vertical;
    }
    if mask.includes(Axis::Horizontal) {
        delta.horizontal = -delta.horizontal;
    }
    event.with_delta(delta)
}

/// Apply a direction preference: `Natural` leaves the event untouched
pub fn apply_direction(event: &ScrollEvent, mask: AxisMask, direction: Direction) -> ScrollEvent {
    match direction {
        Direction::Natural => *event,
        Direction::Inverted => invert(event, mask),
    }
}

/// Move the vertical component into the horizontal slot.
///
/// The existing horizontal component is discarded, so applying this twice
/// loses the vertical input. Apply at most once per raw event.
pub fn rotate_to_horizontal(event: &ScrollEvent) -> ScrollEvent {
    let delta = event.delta();
    event.swapped(PixelDelta::new(0.0, delta.vertical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pixel_event_scales_lines() {
        let raw = RawScrollEvent::new(LineDelta::new(2, 0));
        let event = build_pixel_event(&raw, 10.0).unwrap();
        assert_eq!(event.delta(), PixelDelta::new(20.0, 0.0));
        assert_eq!(event.phase(), ScrollPhase::None);
    }

    #[test]
    fn test_build_pixel_event_rejects_bad_line_height() {
        let raw = RawScrollEvent::new(LineDelta::new(2, 0));
        assert!(matches!(build_pixel_event(&raw, 0.0), Err(Error::Config(_))));
        assert!(matches!(build_pixel_event(&raw, -3.0), Err(Error::Config(_))));
        assert!(matches!(build_pixel_event(&raw, f64::NAN), Err(Error::Config(_))));
    }

    #[test]
    fn test_build_pixel_event_preserves_phase() {
        let raw = RawScrollEvent {
            phase: ScrollPhase::Linear,
            delta: LineDelta::new(-1, 3),
        };
        let event = build_pixel_event(&raw, 12.5).unwrap();
        assert_eq!(event.phase(), ScrollPhase::Linear);
        assert_eq!(event.delta(), PixelDelta::new(-12.5, 37.5));
    }

    #[test]
    fn test_normalized_event() {
        let event = normalized_event(16.0, Axis::Horizontal).unwrap();
        assert_eq!(event.delta(), PixelDelta::new(0.0, 16.0));
        assert!(matches!(normalized_event(0.0, Axis::Vertical), Err(Error::Config(_))));
    }

    #[test]
    fn test_invert_masks() {
        let event = ScrollEvent::new(ScrollPhase::Linear, PixelDelta::new(5.0, -3.0));
        assert_eq!(invert(&event, AxisMask::Vertical).delta(), PixelDelta::new(-5.0, -3.0));
        assert_eq!(invert(&event, AxisMask::Horizontal).delta(), PixelDelta::new(5.0, 3.0));
        assert_eq!(invert(&event, AxisMask::Both).delta(), PixelDelta::new(-5.0, 3.0));
        assert_eq!(invert(&event, AxisMask::Both).phase(), ScrollPhase::Linear);
    }

    #[test]
    fn test_double_inversion_is_identity() {
        let events = [
            ScrollEvent::new(ScrollPhase::Start, PixelDelta::new(5.0, -3.0)),
            ScrollEvent::new(ScrollPhase::Momentum, PixelDelta::new(0.25, 0.0)),
            rotate_to_horizontal(&ScrollEvent::new(ScrollPhase::End, PixelDelta::new(-7.0, 1.0))),
        ];
        for event in events {
            for mask in [AxisMask::Vertical, AxisMask::Horizontal, AxisMask::Both] {
                assert_eq!(invert(&invert(&event, mask), mask), event);
            }
        }
    }

    #[test]
    fn test_apply_direction() {
        let event = ScrollEvent::new(ScrollPhase::Linear, PixelDelta::new(5.0, 1.0));
        assert_eq!(apply_direction(&event, AxisMask::Both, Direction::Natural), event);
        assert_eq!(
            apply_direction(&event, AxisMask::Vertical, Direction::Inverted).delta(),
            PixelDelta::new(-5.0, 1.0)
        );
    }

    #[test]
    fn test_rotate_to_horizontal() {
        let event = ScrollEvent::new(ScrollPhase::Momentum, PixelDelta::new(30.0, 4.0));
        let rotated = rotate_to_horizontal(&event);
        assert_eq!(rotated.delta(), PixelDelta::new(0.0, 30.0));
        assert_eq!(rotated.phase(), ScrollPhase::Momentum);
        assert!(rotated.axes_swapped());
        assert!(!event.axes_swapped());
    }

    #[test]
    fn test_rotate_twice_loses_vertical() {
        let event = ScrollEvent::new(ScrollPhase::Linear, PixelDelta::new(30.0, 0.0));
        let twice = rotate_to_horizontal(&rotate_to_horizontal(&event));
        assert_eq!(twice.delta(), PixelDelta::ZERO);
    }
}
