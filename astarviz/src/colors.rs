//! Role colours.

use astarviz_core::style::Color;
use astarviz_paths::Role;

use crate::config::ColorsConfig;
use crate::error::{Result, VizError};

pub const START: Color = Color::from_rgb(0, 179, 179);
pub const GOAL: Color = Color::from_rgb(255, 102, 102);
pub const WALL: Color = Color::from_rgb(20, 31, 31);
pub const PATH: Color = Color::from_rgb(51, 255, 51);
pub const EMPTY: Color = Color::from_rgb(255, 255, 255);
/// Second checkerboard tone, so cell boundaries stay visible.
pub const EMPTY_ALT: Color = Color::from_rgb(238, 242, 242);

pub const STATUS_BG: Color = Color::from_rgb(40, 42, 54);
pub const STATUS_FG: Color = Color::from_rgb(248, 248, 242);

/// The colours a board is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub start: Color,
    pub goal: Color,
    pub wall: Color,
    pub path: Color,
    pub empty: Color,
    pub empty_alt: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            start: START,
            goal: GOAL,
            wall: WALL,
            path: PATH,
            empty: EMPTY,
            empty_alt: EMPTY_ALT,
        }
    }
}

fn parse(field: &str, value: &str) -> Result<Color> {
    Color::from_hex(value)
        .ok_or_else(|| VizError::Config(format!("colors.{field}: invalid colour {value:?}")))
}

impl Palette {
    pub fn from_config(c: &ColorsConfig) -> Result<Self> {
        Ok(Self {
            start: parse("start", &c.start)?,
            goal: parse("goal", &c.goal)?,
            wall: parse("wall", &c.wall)?,
            path: parse("path", &c.path)?,
            empty: parse("empty", &c.empty)?,
            empty_alt: parse("empty_alt", &c.empty_alt)?,
        })
    }

    /// Fill colour of a board cell holding `role` at (`row`, `col`).
    pub fn role_color(&self, role: Role, row: i32, col: i32) -> Color {
        match role {
            Role::Start => self.start,
            Role::Goal => self.goal,
            Role::Wall => self.wall,
            Role::PathMarker => self.path,
            Role::Empty if (row + col) % 2 == 0 => self.empty,
            Role::Empty => self.empty_alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let p = Palette::from_config(&ColorsConfig::default()).unwrap();
        assert_eq!(p, Palette::default());
    }

    #[test]
    fn bad_hex_names_the_field() {
        let c = ColorsConfig {
            goal: "red".into(),
            ..ColorsConfig::default()
        };
        let err = Palette::from_config(&c).unwrap_err();
        assert!(err.to_string().contains("colors.goal"));
    }

    #[test]
    fn empty_cells_alternate() {
        let p = Palette::default();
        assert_eq!(p.role_color(Role::Empty, 0, 0), EMPTY);
        assert_eq!(p.role_color(Role::Empty, 0, 1), EMPTY_ALT);
        assert_eq!(p.role_color(Role::Empty, 1, 1), EMPTY);
        assert_eq!(p.role_color(Role::Wall, 0, 1), WALL);
    }
}
