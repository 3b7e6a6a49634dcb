use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::time::Instant;
use tracing::{debug, info};

use smoothwheel_core::{
    AppId, DeviceId, DeviceRegistry, EngineConfig, Point, ScrollEvent, TickInput,
};

use crate::trace;

/// Upper bound on idle ticks fed after the trace ends
const MAX_MOMENTUM_TICKS: u32 = 10_000;

pub struct ReplayOptions {
    pub device: String,
    pub realtime: bool,
    pub tick_ms: u64,
    pub fields: bool,
}

pub async fn run(config: EngineConfig, path: &Path, options: ReplayOptions) -> Result<()> {
    let lines = trace::load(path)?;
    if lines.is_empty() {
        println!("Trace is empty.");
        return Ok(());
    }

    let mut registry = DeviceRegistry::new(config)?;
    let device = DeviceId::new(options.device.clone());
    registry.register(device.clone())?;

    println!("Replaying {} ticks on device '{}'...\n", lines.len(), device);

    let started = Instant::now();
    let mut emitted = 0usize;
    let mut pointer = Point::default();
    let mut app = AppId::new("unknown");

    for line in &lines {
        if options.realtime {
            if let Some(at_ms) = line.at_ms {
                tokio::time::sleep_until(started + Duration::from_millis(at_ms)).await;
            }
        }

        let input = line.to_input();
        pointer = input.pointer;
        app = input.frontmost_app.clone();

        let events = registry.tick(&device, input)?;
        emitted += print_events(&registry, &device, &events, emitted, options.fields)?;
    }

    // Act as the host's momentum ticker until the gesture settles
    let mut interval = tokio::time::interval(Duration::from_millis(options.tick_ms.max(1)));
    // Skip the first tick (fires immediately)
    interval.tick().await;

    let mut idle_ticks = 0u32;
    while registry.active().next().is_some() {
        if idle_ticks >= MAX_MOMENTUM_TICKS {
            info!("Momentum still running after {} ticks, giving up", idle_ticks);
            break;
        }
        if options.realtime {
            tokio::select! {
                _ = interval.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        let events = registry.tick(&device, TickInput::idle(pointer, app.clone()))?;
        emitted += print_events(&registry, &device, &events, emitted, options.fields)?;
        idle_ticks += 1;
    }

    debug!(idle_ticks, "Momentum ticker finished");
    println!("\nReplay complete. {} events emitted.", emitted);

    Ok(())
}

fn print_events(
    registry: &DeviceRegistry,
    device: &DeviceId,
    events: &[ScrollEvent],
    offset: usize,
    fields: bool,
) -> Result<usize> {
    let scroller = registry
        .key_of(device)
        .and_then(|key| registry.get(key))
        .ok_or_else(|| anyhow::anyhow!("Device '{}' disappeared during replay", device))?;

    for (i, event) in events.iter().enumerate() {
        println!("{:>6}  {}", offset + i, event.describe(scroller.phase_table()));
        if fields {
            let rendered = scroller
                .fields(event)?
                .iter()
                .map(|f| format!("{}={:?}", f.id, f.value))
                .collect::<Vec<_>>()
                .join(" ");
            println!("        {}", rendered);
        }
    }

    Ok(events.len())
}
