//! What drivers and subscriptions tell the model.

use std::time::Instant;

use crate::geom::Point;

/// Keys the drivers report. Anything else is dropped at the driver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Left button down.
    Main,
    /// Right button down.
    Secondary,
    WheelUp,
    WheelDown,
    /// Any button up.
    Release,
    /// The pointer entered another screen cell.
    Move,
}

#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        time: Instant,
    },
    /// `pos` is in screen cells, not board cells.
    Mouse {
        action: MouseAction,
        pos: Point,
        time: Instant,
    },
    /// New screen size in cells.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    Tick {
        time: Instant,
    },
    /// First message after the driver is up.
    Init,
    /// Stops the runner before the model sees it.
    Quit,
}

impl Msg {
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            time: Instant::now(),
        }
    }

    pub fn tick() -> Self {
        Self::Tick {
            time: Instant::now(),
        }
    }
}
