use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::event::AxisMask;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub momentum: MomentumConfig,
    #[serde(default)]
    pub gate: GateConfig,
    /// Per-device overrides, keyed by device id
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Pixels per wheel line
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    /// Pixel magnitude of an emulated single notch
    #[serde(default = "default_normalized_pixels")]
    pub normalized_pixels: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            line_height: default_line_height(),
            normalized_pixels: default_normalized_pixels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Coast after the wheel stops instead of ending the gesture at once
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Momentum ends once the decayed delta falls below this many pixels
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Decay strategy
    #[serde(default)]
    pub decay: DecayConfig,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            epsilon: default_epsilon(),
            decay: DecayConfig::default(),
        }
    }
}

/// Momentum decay strategy selection
///
/// ```toml
/// [momentum]
/// decay = { kind = "exponential", factor = 0.9 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecayConfig {
    /// Multiply the delta by `factor` every tick
    Exponential { factor: f64 },
    /// Shrink the delta magnitude by `step` pixels every tick
    Friction { step: f64 },
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig::Exponential {
            factor: default_decay_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Pointer travel (pixels, per coordinate) still treated as stationary
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: default_proximity_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Axes whose direction is inverted
    #[serde(default)]
    pub invert: Option<AxisMask>,
    /// Route vertical wheel input to the horizontal axis
    #[serde(default)]
    pub horizontal: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_line_height() -> f64 {
    10.0
}

fn default_normalized_pixels() -> f64 {
    10.0
}

fn default_epsilon() -> f64 {
    1.0
}

fn default_decay_factor() -> f64 {
    0.9
}

fn default_proximity_threshold() -> f64 {
    5.0
}

fn invalid(message: String) -> crate::Error {
    crate::Error::Config(message)
}

impl EngineConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| invalid(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/smoothwheel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothwheel")
            .join("config.toml")
    }

    /// Per-device settings, falling back to defaults for unknown devices
    pub fn device(&self, id: &str) -> DeviceConfig {
        self.devices.get(id).cloned().unwrap_or_default()
    }

    /// Reject values that would silently distort scroll speed
    pub fn validate(&self) -> crate::Result<()> {
        let scroll = &self.scroll;
        if !scroll.line_height.is_finite() || scroll.line_height <= 0.0 {
            return Err(invalid(format!(
                "scroll.line_height must be > 0, got {}",
                scroll.line_height
            )));
        }
        if !scroll.normalized_pixels.is_finite() || scroll.normalized_pixels == 0.0 {
            return Err(invalid(format!(
                "scroll.normalized_pixels must be nonzero, got {}",
                scroll.normalized_pixels
            )));
        }

        let momentum = &self.momentum;
        if !momentum.epsilon.is_finite() || momentum.epsilon <= 0.0 {
            return Err(invalid(format!(
                "momentum.epsilon must be > 0, got {}",
                momentum.epsilon
            )));
        }
        match momentum.decay {
            DecayConfig::Exponential { factor } if !(factor > 0.0 && factor < 1.0) => {
                return Err(invalid(format!(
                    "momentum.decay.factor must be in (0, 1), got {}",
                    factor
                )));
            }
            DecayConfig::Friction { step } if !step.is_finite() || step <= 0.0 => {
                return Err(invalid(format!(
                    "momentum.decay.step must be > 0, got {}",
                    step
                )));
            }
            _ => {}
        }

        let threshold = self.gate.proximity_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(invalid(format!(
                "gate.proximity_threshold must be >= 0, got {}",
                threshold
            )));
        }

        Ok(())
    }
}
