//! Board size presets: the three dimensions the board can be rebuilt at.

use serde::Deserialize;

/// A board size preset. The pixel cell size shrinks as the board grows so
/// every preset covers the same 1000×680 pixel area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Small, BoardSize::Medium, BoardSize::Large];

    pub const fn rows(self) -> i32 {
        match self {
            BoardSize::Small => 17,
            BoardSize::Medium => 34,
            BoardSize::Large => 68,
        }
    }

    pub const fn columns(self) -> i32 {
        match self {
            BoardSize::Small => 25,
            BoardSize::Medium => 50,
            BoardSize::Large => 100,
        }
    }

    /// Side of one board cell in pixels.
    pub const fn cell_size(self) -> i32 {
        match self {
            BoardSize::Small => 40,
            BoardSize::Medium => 20,
            BoardSize::Large => 10,
        }
    }

    /// Next larger preset, saturating.
    pub fn larger(self) -> Self {
        match self {
            BoardSize::Small => BoardSize::Medium,
            _ => BoardSize::Large,
        }
    }

    /// Next smaller preset, saturating.
    pub fn smaller(self) -> Self {
        match self {
            BoardSize::Large => BoardSize::Medium,
            _ => BoardSize::Small,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BoardSize::Small => "small",
            BoardSize::Medium => "medium",
            BoardSize::Large => "large",
        }
    }
}
