//! **astarviz**: an interactive A* path-finding visualizer.
//!
//! Place a start and a goal on a grid board, draw walls, and watch the
//! shortest four-directional path get revealed cell by cell. The model runs
//! on top of the terminal driver (`astarviz`) or the window driver
//! (`astarviz-winit`, behind the `winit` feature).

pub mod colors;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod preset;
pub mod reveal;

pub use config::VizConfig;
pub use error::{Result, VizError};
pub use model::{Footprint, Visualizer, VisualizerConfig};
pub use preset::BoardSize;
