pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;

pub use compare::Point;
pub use config::{DecayConfig, DeviceConfig, EngineConfig};
pub use engine::{AppId, DeviceId, DeviceRegistry, DeviceScroller, PhaseMachine, TickInput};
pub use error::{Error, Result};
pub use event::{Axis, AxisMask, LineDelta, PixelDelta, RawScrollEvent, ScrollEvent, ScrollPhase};
