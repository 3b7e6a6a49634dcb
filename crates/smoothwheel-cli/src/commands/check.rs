use std::path::Path;

use anyhow::Result;

use smoothwheel_core::event::PhaseTable;
use smoothwheel_core::{DecayConfig, EngineConfig};

pub fn run(config: &EngineConfig, path: Option<&Path>) -> Result<()> {
    config.validate()?;
    PhaseTable::native()?;

    let source = match path {
        Some(p) => p.display().to_string(),
        None if EngineConfig::config_path().exists() => {
            EngineConfig::config_path().display().to_string()
        }
        None => "built-in defaults".to_string(),
    };

    println!("Configuration OK ({})\n", source);
    println!("  Line height:         {} px", config.scroll.line_height);
    println!("  Notch size:          {} px", config.scroll.normalized_pixels);
    println!(
        "  Momentum:            {}",
        if config.momentum.enabled { "enabled" } else { "disabled" }
    );
    match config.momentum.decay {
        DecayConfig::Exponential { factor } => {
            println!("  Decay:               exponential (factor {})", factor)
        }
        DecayConfig::Friction { step } => {
            println!("  Decay:               friction ({} px/tick)", step)
        }
    }
    println!("  Momentum epsilon:    {} px", config.momentum.epsilon);
    println!("  Proximity threshold: {} px", config.gate.proximity_threshold);

    if config.devices.is_empty() {
        println!("\nNo per-device settings.");
    } else {
        println!("\nDevices ({}):", config.devices.len());
        for (id, device) in &config.devices {
            let invert = device
                .invert
                .map(|mask| format!("{:?}", mask).to_lowercase())
                .unwrap_or_else(|| "none".to_string());
            println!("  {} - invert: {}, horizontal: {}", id, invert, device.horizontal);
        }
    }

    Ok(())
}
