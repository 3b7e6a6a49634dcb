//! Scroll event values and the pure transforms that build and rewrite them.

pub mod axis;
pub mod delta;
pub mod phase;
pub mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use axis::{Axis, AxisMask};
pub use delta::{LineDelta, PixelDelta};
pub use phase::{HidPhase, MomentumPhase, OsScrollPhase, PhaseTable, ScrollPhase};
pub use transform::Direction;

use crate::Result;

/// Scroll-wheel field ids of the platform event record
pub mod field {
    pub const DELTA_AXIS_1: u32 = 11;
    pub const DELTA_AXIS_2: u32 = 12;
    pub const IS_CONTINUOUS: u32 = 88;
    pub const FIXED_PT_DELTA_AXIS_1: u32 = 93;
    pub const FIXED_PT_DELTA_AXIS_2: u32 = 94;
    pub const POINT_DELTA_AXIS_1: u32 = 96;
    pub const POINT_DELTA_AXIS_2: u32 = 97;
    pub const SCROLL_PHASE: u32 = 99;
    pub const MOMENTUM_PHASE: u32 = 123;
}

/// Line-resolution event as delivered by the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawScrollEvent {
    #[serde(default)]
    pub phase: ScrollPhase,
    pub delta: LineDelta,
}

impl RawScrollEvent {
    pub fn new(delta: LineDelta) -> Self {
        Self {
            phase: ScrollPhase::None,
            delta,
        }
    }
}

/// Value stored in one event field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Double(f64),
}

/// One `(field id, value)` pair of the native event record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventField {
    pub id: u32,
    pub value: FieldValue,
}

impl EventField {
    fn integer(id: u32, value: i64) -> Self {
        Self {
            id,
            value: FieldValue::Integer(value),
        }
    }

    fn double(id: u32, value: f64) -> Self {
        Self {
            id,
            value: FieldValue::Double(value),
        }
    }
}

/// Synthetic pixel-resolution scroll event.
///
/// Immutable once built: every transform in `transform` returns a new
/// event and leaves the phase untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    phase: ScrollPhase,
    delta: PixelDelta,
    axes_swapped: bool,
}

impl ScrollEvent {
    pub fn new(phase: ScrollPhase, delta: PixelDelta) -> Self {
        Self {
            phase,
            delta,
            axes_swapped: false,
        }
    }

    pub(crate) fn with_delta(self, delta: PixelDelta) -> Self {
        Self { delta, ..self }
    }

    pub(crate) fn swapped(self, delta: PixelDelta) -> Self {
        Self {
            delta,
            axes_swapped: true,
            ..self
        }
    }

    #[inline]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    #[inline]
    pub fn delta(&self) -> PixelDelta {
        self.delta
    }

    /// Whether the vertical input was rerouted to the horizontal axis
    #[inline]
    pub fn axes_swapped(&self) -> bool {
        self.axes_swapped
    }

    /// Render the event into native scroll-wheel fields.
    ///
    /// Line fields carry the pixel delta divided by `line_height`, rounded
    /// toward zero but never to zero for a nonzero pixel delta. Fixed-point
    /// fields are 16.16 line values.
    pub fn fields(&self, table: &PhaseTable, line_height: f64) -> Result<Vec<EventField>> {
        transform::check_line_height(line_height)?;
        let native = table.get(self.phase);

        let v_lines = self.delta.vertical / line_height;
        let h_lines = self.delta.horizontal / line_height;

        Ok(vec![
            EventField::integer(field::IS_CONTINUOUS, 1),
            EventField::integer(field::DELTA_AXIS_1, whole_lines(v_lines)),
            EventField::integer(field::DELTA_AXIS_2, whole_lines(h_lines)),
            EventField::integer(field::FIXED_PT_DELTA_AXIS_1, fixed_point(v_lines)),
            EventField::integer(field::FIXED_PT_DELTA_AXIS_2, fixed_point(h_lines)),
            EventField::double(field::POINT_DELTA_AXIS_1, self.delta.vertical),
            EventField::double(field::POINT_DELTA_AXIS_2, self.delta.horizontal),
            EventField::integer(field::SCROLL_PHASE, native.scroll.code() as i64),
            EventField::integer(field::MOMENTUM_PHASE, native.momentum.code() as i64),
        ])
    }
}

fn whole_lines(lines: f64) -> i64 {
    if lines == 0.0 {
        0
    } else if lines.abs() < 1.0 {
        lines.signum() as i64
    } else {
        lines.trunc() as i64
    }
}

fn fixed_point(lines: f64) -> i64 {
    (lines * 65536.0).round() as i64
}

impl ScrollEvent {
    /// Log form including the platform phase pair, e.g.
    /// `phase=start os=Began/None v=20.00px h=0.00px`
    pub fn describe<'a>(&'a self, table: &'a PhaseTable) -> impl fmt::Display + 'a {
        Described { event: self, table }
    }

    fn write_log(&self, f: &mut fmt::Formatter<'_>, os: Option<OsScrollPhase>) -> fmt::Result {
        write!(f, "phase={}", self.phase)?;
        if let Some(os) = os {
            write!(f, " os={}", os)?;
        }
        write!(
            f,
            " v={:.2}px h={:.2}px",
            self.delta.vertical, self.delta.horizontal
        )?;
        if self.axes_swapped {
            f.write_str(" swapped")?;
        }
        Ok(())
    }
}

struct Described<'a> {
    event: &'a ScrollEvent,
    table: &'a PhaseTable,
}

impl fmt::Display for Described<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.event
            .write_log(f, Some(self.table.get(self.event.phase)))
    }
}

impl fmt::Display for ScrollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_log(f, None)
    }
}
