//! astarviz terminal entry point.

use std::path::{Path, PathBuf};

use astarviz_core::{
    Point,
    app::{App, AppConfig},
};
use astarviz_crossterm::CrosstermDriver;
use astarviz_lib::{Footprint, Visualizer, VisualizerConfig, VizConfig, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = VizConfig::load_or_default(config_path.as_deref())?;
    logging::init_file(Path::new(&config.log_file))?;

    let viz_config = VisualizerConfig::from_config(&config, Footprint::Fixed(Point::new(2, 1)))?;
    let model = Visualizer::new(viz_config);
    let wanted = model.screen_size();
    let (width, height) = CrosstermDriver::screen_size().unwrap_or((wanted.x, wanted.y));
    log::info!("terminal is {width}x{height}, board needs {}x{}", wanted.x, wanted.y);

    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width,
        height,
    });
    app.run()?;
    log::info!("bye");
    Ok(())
}
