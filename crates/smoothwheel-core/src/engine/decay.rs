//! Momentum decay strategies.
//!
//! The phase machine only asks a strategy for the next delta; the shape of
//! the curve is configuration. Strategies must never grow the delta or flip
//! its direction.

use std::fmt;

use crate::config::DecayConfig;
use crate::event::PixelDelta;
use crate::{Error, Result};

/// Produces the next momentum delta from the previous one
pub trait MomentumDecay: fmt::Debug + Send + Sync {
    /// `elapsed_ticks` counts momentum ticks so far, starting at 1 for the
    /// first one
    fn next_delta(&self, previous: PixelDelta, elapsed_ticks: u32) -> PixelDelta;
}

/// Geometric decay: every tick keeps `factor` of the previous delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    factor: f64,
}

impl ExponentialDecay {
    /// `factor` must lie in (0, 1) or momentum would never end
    pub fn new(factor: f64) -> Result<Self> {
        if !(factor > 0.0 && factor < 1.0) {
            return Err(Error::Config(format!(
                "momentum.decay.factor must be in (0, 1), got {}",
                factor
            )));
        }
        Ok(Self { factor })
    }
}

impl MomentumDecay for ExponentialDecay {
    #[inline]
    fn next_delta(&self, previous: PixelDelta, _elapsed_ticks: u32) -> PixelDelta {
        previous.scale(self.factor)
    }
}

/// Constant deceleration: every tick removes `step` pixels of magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionDecay {
    step: f64,
}

impl FrictionDecay {
    pub fn new(step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::Config(format!(
                "momentum.decay.step must be > 0, got {}",
                step
            )));
        }
        Ok(Self { step })
    }
}

impl MomentumDecay for FrictionDecay {
    fn next_delta(&self, previous: PixelDelta, _elapsed_ticks: u32) -> PixelDelta {
        let magnitude = previous.magnitude();
        if magnitude <= self.step {
            return PixelDelta::ZERO;
        }
        previous.scale((magnitude - self.step) / magnitude)
    }
}

impl DecayConfig {
    /// Instantiate the configured strategy
    pub fn build(&self) -> Result<Box<dyn MomentumDecay>> {
        Ok(match *self {
            DecayConfig::Exponential { factor } => Box::new(ExponentialDecay::new(factor)?),
            DecayConfig::Friction { step } => Box::new(FrictionDecay::new(step)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay() {
        let decay = ExponentialDecay::new(0.5).unwrap();
        let next = decay.next_delta(PixelDelta::new(80.0, -8.0), 1);
        assert_eq!(next, PixelDelta::new(40.0, -4.0));
    }

    #[test]
    fn test_friction_decay_preserves_direction() {
        let decay = FrictionDecay::new(5.0).unwrap();
        let next = decay.next_delta(PixelDelta::new(0.0, -20.0), 1);
        assert!((next.horizontal + 15.0).abs() < 1e-9);
        assert_eq!(next.vertical, 0.0);
    }

    #[test]
    fn test_friction_decay_stops_at_zero() {
        let decay = FrictionDecay::new(5.0).unwrap();
        assert_eq!(decay.next_delta(PixelDelta::new(3.0, 0.0), 4), PixelDelta::ZERO);
    }

    #[test]
    fn test_rejects_curves_that_never_end() {
        for factor in [0.0, 1.0, 1.5, -0.5, f64::NAN] {
            assert!(
                matches!(ExponentialDecay::new(factor), Err(Error::Config(_))),
                "factor {}",
                factor
            );
        }
        for step in [0.0, -2.0, f64::INFINITY] {
            assert!(
                matches!(FrictionDecay::new(step), Err(Error::Config(_))),
                "step {}",
                step
            );
        }
        assert!(DecayConfig::Exponential { factor: 1.5 }.build().is_err());
        assert!(DecayConfig::Friction { step: -2.0 }.build().is_err());
    }

    #[test]
    fn test_decay_is_monotonic() {
        for config in [
            DecayConfig::Exponential { factor: 0.85 },
            DecayConfig::Friction { step: 3.0 },
        ] {
            let decay = config.build().unwrap();
            let mut delta = PixelDelta::new(120.0, 10.0);
            for tick in 1..50 {
                let next = decay.next_delta(delta, tick);
                assert!(next.magnitude() <= delta.magnitude(), "{:?} grew at {}", config, tick);
                assert!(next.vertical >= 0.0 && next.horizontal >= 0.0);
                delta = next;
            }
        }
    }
}
