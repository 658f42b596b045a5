//! astarviz graphical (winit + softbuffer) entry point.

use std::path::PathBuf;

use astarviz_core::app::{AppRunner, EventLoopDriver};
use astarviz_lib::{Footprint, Visualizer, VisualizerConfig, VizConfig, logging};
use astarviz_winit::{WinitConfig, WinitDriver};

/// Pixel side of one screen cell; the small preset's 40px cells cover 4×4.
const UNIT_PX: i32 = 10;

fn run() -> astarviz_lib::Result<()> {
    logging::init_stderr()?;
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = VizConfig::load_or_default(config_path.as_deref())?;

    let mut viz_config = VisualizerConfig::from_config(&config, Footprint::Scaled { unit_px: UNIT_PX })?;
    // No glyphs are rendered in the window.
    viz_config.status_bar = false;
    let model = Visualizer::new(viz_config);
    let size = model.screen_size();

    let driver = WinitDriver::new(WinitConfig {
        cell_px: UNIT_PX as usize,
        grid_width: size.x,
        grid_height: size.y,
        ..Default::default()
    });
    let runner = AppRunner::new(Box::new(model), size.x, size.y);
    driver.run(runner)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
