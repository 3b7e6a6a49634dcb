use std::fmt;

use crate::compare::Point;
use crate::config::{DeviceConfig, EngineConfig};
use crate::event::{
    axis, transform, EventField, LineDelta, PhaseTable, ScrollEvent, ScrollPhase,
};
use crate::Result;

use super::gate::{AppId, MotionGate};
use super::machine::PhaseMachine;

/// Identity of a physical input device
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the host knows about one hardware tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickInput {
    /// Wheel movement, zero for a momentum-only tick
    pub lines: LineDelta,
    /// Current pointer location
    pub pointer: Point,
    /// Current frontmost application
    pub frontmost_app: AppId,
    /// External modifier policy asks for horizontal scrolling
    pub reroute_horizontal: bool,
}

impl TickInput {
    pub fn new(lines: LineDelta, pointer: Point, frontmost_app: AppId) -> Self {
        Self {
            lines,
            pointer,
            frontmost_app,
            reroute_horizontal: false,
        }
    }

    /// Zero-delta tick for driving momentum
    pub fn idle(pointer: Point, frontmost_app: AppId) -> Self {
        Self::new(LineDelta::ZERO, pointer, frontmost_app)
    }
}

/// The phase machine and motion gate owned by one device
#[derive(Debug)]
pub struct DeviceScroller {
    id: DeviceId,
    machine: PhaseMachine,
    gate: MotionGate,
    table: PhaseTable,
    settings: DeviceConfig,
    normalized_pixels: f64,
}

impl DeviceScroller {
    pub fn new(id: DeviceId, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let table = PhaseTable::native()?;
        let machine = PhaseMachine::from_config(config)?;
        let settings = config.device(id.as_str());

        Ok(Self {
            id,
            machine,
            gate: MotionGate::new(config.gate.proximity_threshold)?,
            table,
            settings,
            normalized_pixels: config.scroll.normalized_pixels,
        })
    }

    /// Replace the machine, e.g. to inject a custom decay strategy
    pub fn with_machine(mut self, machine: PhaseMachine) -> Self {
        self.machine = machine;
        self
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn phase(&self) -> ScrollPhase {
        self.machine.phase()
    }

    /// Whether a momentum ticker should keep feeding idle ticks
    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    pub fn phase_table(&self) -> &PhaseTable {
        &self.table
    }

    /// Process one tick and return the events to dispatch, in order.
    ///
    /// Idle ticks return nothing. Both gate baselines are committed before
    /// returning, whether or not the tick succeeded.
    pub fn tick(&mut self, input: TickInput) -> Result<Vec<ScrollEvent>> {
        let horizontal = input.reroute_horizontal || self.settings.horizontal;

        self.gate.observe(input.pointer, input.frontmost_app);
        let signals = self.gate.signals();
        let advanced = self.machine.advance(input.lines, signals);
        self.gate.commit_pointer_baseline();
        self.gate.commit_frontmost_app_baseline();

        let tick = advanced?;
        let events = tick
            .emissions()
            .filter(|e| e.phase != ScrollPhase::None)
            .map(|e| self.route(ScrollEvent::new(e.phase, e.delta), horizontal))
            .collect::<Vec<_>>();

        for event in &events {
            tracing::trace!(device = %self.id, "{}", event.describe(&self.table));
        }

        Ok(events)
    }

    /// Discrete one-notch event in the direction of `lines`' dominant axis
    pub fn notch(&self, lines: LineDelta) -> Result<ScrollEvent> {
        let axis = axis::resolve(lines.vertical, lines.horizontal)?;
        let pixels = self.normalized_pixels * lines.component(axis).signum() as f64;
        let event = transform::normalized_event(pixels, axis)?;
        Ok(self.route(event, self.settings.horizontal))
    }

    /// Native field rendering of an event produced by this device
    pub fn fields(&self, event: &ScrollEvent) -> Result<Vec<EventField>> {
        event.fields(&self.table, self.machine.line_height())
    }

    /// Forget the gesture and the gate baselines (device reconnect)
    pub fn reset(&mut self) {
        self.machine.reset();
        self.gate.reset();
        tracing::debug!(device = %self.id, "Scroll state reset");
    }

    fn route(&self, event: ScrollEvent, horizontal: bool) -> ScrollEvent {
        let event = match self.settings.invert {
            Some(mask) => transform::invert(&event, mask),
            None => event,
        };
        // Tilt input is already horizontal and rotating it would drop it
        if horizontal && event.delta().vertical != 0.0 {
            transform::rotate_to_horizontal(&event)
        } else {
            event
        }
    }
}
