//! **astarviz-core**: core types for the astarviz grid visualizer.
//!
//! Geometry primitives, styled screen cells, a screen buffer with frame
//! diffing, input messages, and the Elm-architecture application loop shared
//! by the terminal and window drivers.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, AppRunner, Context, Driver, Effect, EventLoopDriver, Model};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid};
pub use messages::*;
pub use style::{AttrMask, Color, Style};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_and_color_round_trip() {
        let p = Point::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Point>(&json).unwrap(), p);

        let c = Color::from_rgb(51, 255, 51);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap(), c);
    }
}
