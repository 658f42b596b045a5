//! Cell colours and the bold flag used by the status line.

use std::ops::BitOr;

/// `0x00RRGGBB`. Zero is reserved for [`Color::DEFAULT`], the driver's own
/// colour, so `#000000` cannot be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const DEFAULT: Self = Self(0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([0, r, g, b]))
    }

    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// `#rrggbb`, with or without the `#`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    pub const fn with_fg(self, fg: Color) -> Self {
        Self { fg, ..self }
    }

    pub const fn with_bg(self, bg: Color) -> Self {
        Self { bg, ..self }
    }

    pub const fn with_attrs(self, attrs: AttrMask) -> Self {
        Self { attrs, ..self }
    }
}
