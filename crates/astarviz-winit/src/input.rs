//! Translates winit input events into astarviz [`Msg`] values.

use std::time::Instant;

use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key as WKey, NamedKey};

use astarviz_core::{
    Point,
    messages::{Key, MouseAction, Msg},
};

pub(crate) fn translate_keyboard(event: &KeyEvent) -> Option<Msg> {
    if event.state != ElementState::Pressed {
        return None;
    }

    let key = match &event.logical_key {
        WKey::Named(named) => match named {
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Space => Key::Space,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Delete => Key::Delete,
            _ => return None,
        },
        WKey::Character(s) => single_char(s)?,
        _ => return None,
    };

    Some(Msg::KeyDown {
        key,
        time: Instant::now(),
    })
}

fn single_char(s: &str) -> Option<Key> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Some(Key::Space),
        (Some(c), None) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Pixel position to screen cell.
pub(crate) fn pixel_to_cell(px: f64, py: f64, cell_px: usize) -> Point {
    let side = cell_px.max(1) as f64;
    Point::new((px / side).floor() as i32, (py / side).floor() as i32)
}

pub(crate) fn translate_mouse_button(
    btn_state: ElementState,
    button: MouseButton,
    pos: Point,
) -> Option<Msg> {
    let action = match btn_state {
        ElementState::Pressed => match button {
            MouseButton::Left => MouseAction::Main,
            MouseButton::Right => MouseAction::Secondary,
            _ => return None,
        },
        ElementState::Released => MouseAction::Release,
    };

    Some(Msg::Mouse {
        action,
        pos,
        time: Instant::now(),
    })
}

pub(crate) fn translate_mouse_wheel(delta: MouseScrollDelta, pos: Point) -> Option<Msg> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(p) => p.y,
    };

    let action = if y > 0.0 {
        MouseAction::WheelUp
    } else if y < 0.0 {
        MouseAction::WheelDown
    } else {
        return None;
    };

    Some(Msg::Mouse {
        action,
        pos,
        time: Instant::now(),
    })
}
