//! Stateful scroll synthesis.
//!
//! # Layers
//!
//! ## Atoms
//! - `gate` - pointer / frontmost-app change detection with explicit commits
//! - `decay` - pluggable momentum decay strategies
//!
//! ## Molecules
//! - `machine` - the gesture phase state machine
//! - `device` - one machine + gate pair per physical device
//! - `registry` - arena of per-device scrollers keyed by device id
//!
//! # Usage
//!
//! ```ignore
//! use smoothwheel_core::{DeviceId, DeviceRegistry, EngineConfig, LineDelta, TickInput};
//!
//! let mut registry = DeviceRegistry::new(EngineConfig::load()?)?;
//! let mouse = DeviceId::from("usb-046d-c52b");
//! registry.register(mouse.clone())?;
//!
//! // From the input callback, and from a timer while the device is active
//! let events = registry.tick(&mouse, TickInput::new(LineDelta::new(-1, 0), pointer, app))?;
//! ```

pub mod decay;
pub mod device;
pub mod gate;
pub mod machine;
pub mod registry;

pub use decay::{ExponentialDecay, FrictionDecay, MomentumDecay};
pub use device::{DeviceId, DeviceScroller, TickInput};
pub use gate::{AppId, MotionGate, MotionSignals};
pub use machine::{Emission, PhaseMachine, Tick};
pub use registry::{DeviceKey, DeviceRegistry};
