use anyhow::Result;
use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    // Startup banner — printed before the window opens.
    println!("Hello triangle!");

    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    log::info!(
        "opening \"{}\" at {}x{}",
        config.title,
        config.initial_size.width,
        config.initial_size.height
    );

    // Errors (no adapter, no device, lost surface) exit with a non-zero status.
    Runtime::run(config, GpuInit::default())?;

    log::info!("bye");
    Ok(())
}
