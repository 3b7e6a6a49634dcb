//! Gesture phases and their mapping onto the platform's native phase
//! vocabulary.
//!
//! The platform describes a scroll event with two independent codes: a
//! touch phase (`HidPhase`, mirroring `IOHIDEventPhaseBits`) and a momentum
//! phase (`MomentumPhase`, mirroring `CGMomentumScrollPhase`). The pair is
//! `OsScrollPhase`. The translation from `ScrollPhase` is a fixed table,
//! checked once when a `PhaseTable` is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lifecycle stage of one continuous scrolling gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    /// No active gesture
    #[default]
    None,
    /// First tick of a new gesture
    Start,
    /// User-driven continuation
    Linear,
    /// Inertial continuation after input stopped
    Momentum,
    /// Terminal tick of a gesture
    End,
}

impl ScrollPhase {
    pub const ALL: [ScrollPhase; 5] = [
        ScrollPhase::None,
        ScrollPhase::Start,
        ScrollPhase::Linear,
        ScrollPhase::Momentum,
        ScrollPhase::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Start => "start",
            Self::Linear => "linear",
            Self::Momentum => "momentum",
            Self::End => "end",
        }
    }

    /// Whether a gesture is in progress (anything between `Start` and `End`)
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Start | Self::Linear | Self::Momentum)
    }

    fn slot(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Start => 1,
            Self::Linear => 2,
            Self::Momentum => 3,
            Self::End => 4,
        }
    }
}

impl fmt::Display for ScrollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native touch phase codes (`IOHIDEventPhaseBits`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HidPhase {
    Undefined = 0,
    Began = 1,
    Changed = 2,
    Ended = 4,
    Cancelled = 8,
    MayBegin = 128,
}

impl HidPhase {
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Native momentum phase codes (`CGMomentumScrollPhase`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MomentumPhase {
    None = 0,
    Begin = 1,
    Continue = 2,
    End = 3,
}

impl MomentumPhase {
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Phase as the platform's event pipeline sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsScrollPhase {
    pub scroll: HidPhase,
    pub momentum: MomentumPhase,
}

impl OsScrollPhase {
    /// The "no phase information" pair; never a valid table value
    pub const UNDEFINED: Self = Self::new(HidPhase::Undefined, MomentumPhase::None);

    pub const fn new(scroll: HidPhase, momentum: MomentumPhase) -> Self {
        Self { scroll, momentum }
    }
}

impl fmt::Display for OsScrollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.scroll, self.momentum)
    }
}

/// The platform mapping used by the engine
pub const NATIVE_PHASES: [(ScrollPhase, OsScrollPhase); 5] = [
    (
        ScrollPhase::None,
        OsScrollPhase::new(HidPhase::MayBegin, MomentumPhase::None),
    ),
    (
        ScrollPhase::Start,
        OsScrollPhase::new(HidPhase::Began, MomentumPhase::None),
    ),
    (
        ScrollPhase::Linear,
        OsScrollPhase::new(HidPhase::Changed, MomentumPhase::None),
    ),
    (
        ScrollPhase::Momentum,
        OsScrollPhase::new(HidPhase::Undefined, MomentumPhase::Continue),
    ),
    (
        ScrollPhase::End,
        OsScrollPhase::new(HidPhase::Ended, MomentumPhase::None),
    ),
];

/// Validated ScrollPhase -> OsScrollPhase lookup table.
///
/// Construction guarantees the mapping is total, injective and never yields
/// `OsScrollPhase::UNDEFINED`, so lookups cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTable {
    entries: [OsScrollPhase; 5],
}

impl PhaseTable {
    /// Build and validate a table from `(internal, native)` pairs
    pub fn new(pairs: &[(ScrollPhase, OsScrollPhase)]) -> Result<Self> {
        let mut slots: [Option<OsScrollPhase>; 5] = [None; 5];

        for (phase, native) in pairs {
            if *native == OsScrollPhase::UNDEFINED {
                return Err(Error::PhaseTable(format!("{} maps to the undefined phase", phase)));
            }
            let slot = &mut slots[phase.slot()];
            if slot.is_some() {
                return Err(Error::PhaseTable(format!("{} is mapped more than once", phase)));
            }
            *slot = Some(*native);
        }

        let mut entries = [OsScrollPhase::UNDEFINED; 5];
        for phase in ScrollPhase::ALL {
            entries[phase.slot()] = slots[phase.slot()]
                .ok_or_else(|| Error::PhaseTable(format!("{} has no native phase", phase)))?;
        }

        for (i, a) in ScrollPhase::ALL.iter().enumerate() {
            for b in &ScrollPhase::ALL[i + 1..] {
                if entries[a.slot()] == entries[b.slot()] {
                    return Err(Error::PhaseTable(format!(
                        "{} and {} map to the same native phase {}",
                        a,
                        b,
                        entries[a.slot()]
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    /// The platform table
    pub fn native() -> Result<Self> {
        Self::new(&NATIVE_PHASES)
    }

    #[inline]
    pub fn get(&self, phase: ScrollPhase) -> OsScrollPhase {
        self.entries[phase.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScrollPhase, OsScrollPhase)> + '_ {
        ScrollPhase::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}
