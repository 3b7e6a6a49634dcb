use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

/// Selection of axes an inversion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMask {
    Vertical,
    Horizontal,
    Both,
}

impl AxisMask {
    #[inline]
    pub fn includes(&self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Both, _) | (Self::Vertical, Axis::Vertical) | (Self::Horizontal, Axis::Horizontal)
        )
    }
}

/// Pick the dominant scroll axis for a pair of simultaneous deltas.
///
/// The larger absolute delta wins and ties go to `Vertical`. Callers must
/// filter out all-zero input first; it is rejected with
/// `Error::InvalidInput`.
pub fn resolve(vertical: i64, horizontal: i64) -> Result<Axis> {
    if vertical == 0 && horizontal == 0 {
        return Err(Error::InvalidInput(
            "cannot resolve a dominant axis for an all-zero delta".to_string(),
        ));
    }
    if horizontal.unsigned_abs() > vertical.unsigned_abs() {
        Ok(Axis::Horizontal)
    } else {
        Ok(Axis::Vertical)
    }
}
