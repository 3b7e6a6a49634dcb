//! Gesture phase state machine.
//!
//! Turns a stream of per-tick line deltas into phased pixel deltas:
//!
//! ```text
//! None --input--> Start --input--> Linear --no input--> Momentum --decayed--> End
//!                   |                 |                     |
//!                   +-- reversal / interruption / new input: End, then Start --+
//! ```
//!
//! The machine never schedules itself. Momentum advances only when the
//! caller feeds zero-delta ticks from its own timer.

use crate::compare::same_sign;
use crate::config::EngineConfig;
use crate::event::{axis, transform, Axis, LineDelta, PixelDelta, ScrollPhase};
use crate::{Error, Result};

use super::decay::MomentumDecay;
use super::gate::MotionSignals;

/// One phase tag with its pixel delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub phase: ScrollPhase,
    pub delta: PixelDelta,
}

impl Emission {
    fn new(phase: ScrollPhase, delta: PixelDelta) -> Self {
        Self { phase, delta }
    }
}

/// Result of one `advance` call.
///
/// `current` is the phase the machine is in after the tick. `terminated`
/// is set when the tick had to close the previous gesture before starting
/// a new one; it always precedes `current` on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub terminated: Option<Emission>,
    pub current: Emission,
}

impl Tick {
    fn single(current: Emission) -> Self {
        Self {
            terminated: None,
            current,
        }
    }

    fn restart(end: Emission, start: Emission) -> Self {
        Self {
            terminated: Some(end),
            current: start,
        }
    }

    #[inline]
    pub fn phase(&self) -> ScrollPhase {
        self.current.phase
    }

    /// Emissions in dispatch order
    pub fn emissions(&self) -> impl Iterator<Item = Emission> {
        self.terminated
            .into_iter()
            .chain(std::iter::once(self.current))
    }
}

/// Directions a gesture has committed to.
///
/// Each axis keeps the first nonzero component seen during the gesture; a
/// later component of the opposite sign on either axis is a reversal.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    /// Dominant axis of the opening tick
    axis: Axis,
    vertical: Option<f64>,
    horizontal: Option<f64>,
}

impl Anchor {
    fn new(axis: Axis, pixels: PixelDelta) -> Self {
        let mut anchor = Self {
            axis,
            vertical: None,
            horizontal: None,
        };
        anchor.record(pixels);
        anchor
    }

    fn direction(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }

    fn is_reversed_by(&self, pixels: PixelDelta) -> bool {
        [Axis::Vertical, Axis::Horizontal]
            .into_iter()
            .any(|axis| match self.direction(axis) {
                Some(direction) => !same_sign(direction, pixels.component(axis)),
                None => false,
            })
    }

    fn record(&mut self, pixels: PixelDelta) {
        if self.vertical.is_none() && pixels.vertical != 0.0 {
            self.vertical = Some(pixels.vertical);
        }
        if self.horizontal.is_none() && pixels.horizontal != 0.0 {
            self.horizontal = Some(pixels.horizontal);
        }
    }
}

#[derive(Debug)]
pub struct PhaseMachine {
    line_height: f64,
    epsilon: f64,
    momentum_enabled: bool,
    decay: Box<dyn MomentumDecay>,

    phase: ScrollPhase,
    anchor: Option<Anchor>,
    /// Last user-driven or momentum delta; seeds the next decay step
    velocity: PixelDelta,
    momentum_ticks: u32,
}

impl PhaseMachine {
    /// Create a machine.
    ///
    /// `epsilon` is the pixel magnitude below which momentum ends.
    pub fn new(line_height: f64, epsilon: f64, decay: Box<dyn MomentumDecay>) -> Result<Self> {
        transform::check_line_height(line_height)?;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::Config(format!(
                "momentum epsilon must be > 0, got {}",
                epsilon
            )));
        }

        Ok(Self {
            line_height,
            epsilon,
            momentum_enabled: true,
            decay,
            phase: ScrollPhase::None,
            anchor: None,
            velocity: PixelDelta::ZERO,
            momentum_ticks: 0,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let machine = Self::new(
            config.scroll.line_height,
            config.momentum.epsilon,
            config.momentum.decay.build()?,
        )?;
        Ok(machine.with_momentum(config.momentum.enabled))
    }

    /// Enable or disable the inertial tail
    pub fn with_momentum(mut self, enabled: bool) -> Self {
        self.momentum_enabled = enabled;
        self
    }

    #[inline]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Whether further zero-delta ticks would still produce output
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Drop any gesture in progress without emitting anything
    pub fn reset(&mut self) {
        self.phase = ScrollPhase::None;
        self.clear_gesture();
    }

    /// Advance by one tick.
    ///
    /// A zero `delta` means the wheel produced nothing this tick: an active
    /// gesture coasts (or ends when `signals` report an interruption).
    pub fn advance(&mut self, delta: LineDelta, signals: MotionSignals) -> Result<Tick> {
        let previous = self.phase;

        let tick = if delta.is_zero() {
            Tick::single(self.coast(signals.interrupted()))
        } else {
            let pixels = transform::lines_to_pixels(delta, self.line_height)?;
            let axis = axis::resolve(delta.vertical, delta.horizontal)?;
            self.drive(pixels, axis, signals)
        };

        if tick.terminated.is_some() || previous != self.phase {
            tracing::debug!(
                from = %previous,
                to = %self.phase,
                restarted = tick.terminated.is_some(),
                axis = self.anchor.map(|anchor| anchor.axis.as_str()),
                pointer_moved = signals.pointer_moved,
                app_changed = signals.app_changed,
                "Scroll phase transition"
            );
        }

        Ok(tick)
    }

    /// Tick with wheel input
    fn drive(&mut self, pixels: PixelDelta, axis: Axis, signals: MotionSignals) -> Tick {
        match (self.phase, self.anchor) {
            (ScrollPhase::Start | ScrollPhase::Linear, Some(mut anchor)) => {
                if anchor.is_reversed_by(pixels) || signals.interrupted() {
                    let end = self.finish();
                    Tick::restart(end, self.begin(pixels, axis))
                } else {
                    anchor.record(pixels);
                    self.anchor = Some(anchor);
                    self.phase = ScrollPhase::Linear;
                    self.velocity = pixels;
                    Tick::single(Emission::new(ScrollPhase::Linear, pixels))
                }
            }
            (ScrollPhase::Momentum, _) => {
                let end = self.finish();
                Tick::restart(end, self.begin(pixels, axis))
            }
            _ => Tick::single(self.begin(pixels, axis)),
        }
    }

    /// Tick without wheel input
    fn coast(&mut self, interrupted: bool) -> Emission {
        match self.phase {
            ScrollPhase::None | ScrollPhase::End => {
                self.phase = ScrollPhase::None;
                Emission::new(ScrollPhase::None, PixelDelta::ZERO)
            }
            ScrollPhase::Start | ScrollPhase::Linear => {
                if interrupted || !self.momentum_enabled {
                    self.finish()
                } else {
                    self.momentum_ticks = 0;
                    self.step_momentum()
                }
            }
            ScrollPhase::Momentum => {
                if interrupted {
                    self.finish()
                } else {
                    self.step_momentum()
                }
            }
        }
    }

    fn step_momentum(&mut self) -> Emission {
        self.momentum_ticks = self.momentum_ticks.saturating_add(1);
        let next = self.decay.next_delta(self.velocity, self.momentum_ticks);

        if next.magnitude() < self.epsilon {
            return self.finish();
        }
        if next.magnitude() > self.velocity.magnitude() {
            tracing::warn!(
                previous = self.velocity.magnitude(),
                next = next.magnitude(),
                "Momentum decay strategy increased the delta"
            );
        }

        self.phase = ScrollPhase::Momentum;
        self.velocity = next;
        Emission::new(ScrollPhase::Momentum, next)
    }

    fn begin(&mut self, pixels: PixelDelta, axis: Axis) -> Emission {
        self.phase = ScrollPhase::Start;
        self.anchor = Some(Anchor::new(axis, pixels));
        self.velocity = pixels;
        self.momentum_ticks = 0;
        Emission::new(ScrollPhase::Start, pixels)
    }

    fn finish(&mut self) -> Emission {
        self.phase = ScrollPhase::End;
        self.clear_gesture();
        Emission::new(ScrollPhase::End, PixelDelta::ZERO)
    }

    fn clear_gesture(&mut self) {
        self.anchor = None;
        self.velocity = PixelDelta::ZERO;
        self.momentum_ticks = 0;
    }
}
