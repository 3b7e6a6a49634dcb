use anyhow::Result;

use smoothwheel_core::event::PhaseTable;

pub fn run() -> Result<()> {
    let table = PhaseTable::native()?;

    println!("{:<10} {:<10} {:<6} {:<10} {}", "phase", "scroll", "code", "momentum", "code");
    for (phase, native) in table.iter() {
        println!(
            "{:<10} {:<10} {:<6} {:<10} {}",
            phase.as_str(),
            format!("{:?}", native.scroll),
            native.scroll.code(),
            format!("{:?}", native.momentum),
            native.momentum.code()
        );
    }

    Ok(())
}
