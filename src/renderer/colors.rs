use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TerminalError;

/// 8-bit RGB triple, the representation surfaces expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Text color: the sixteen legacy named colors or an explicit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerminalColor {
    Named(NamedColor),
    Rgb(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    pub fn to_rgb(self) -> Rgb {
        match self {
            NamedColor::Black => Rgb::new(0x00, 0x00, 0x00),
            NamedColor::DarkBlue => Rgb::new(0x00, 0x00, 0xAA),
            NamedColor::DarkGreen => Rgb::new(0x00, 0xAA, 0x00),
            NamedColor::DarkAqua => Rgb::new(0x00, 0xAA, 0xAA),
            NamedColor::DarkRed => Rgb::new(0xAA, 0x00, 0x00),
            NamedColor::DarkPurple => Rgb::new(0xAA, 0x00, 0xAA),
            NamedColor::Gold => Rgb::new(0xFF, 0xAA, 0x00),
            NamedColor::Gray => Rgb::new(0xAA, 0xAA, 0xAA),
            NamedColor::DarkGray => Rgb::new(0x55, 0x55, 0x55),
            NamedColor::Blue => Rgb::new(0x55, 0x55, 0xFF),
            NamedColor::Green => Rgb::new(0x55, 0xFF, 0x55),
            NamedColor::Aqua => Rgb::new(0x55, 0xFF, 0xFF),
            NamedColor::Red => Rgb::new(0xFF, 0x55, 0x55),
            NamedColor::LightPurple => Rgb::new(0xFF, 0x55, 0xFF),
            NamedColor::Yellow => Rgb::new(0xFF, 0xFF, 0x55),
            NamedColor::White => Rgb::new(0xFF, 0xFF, 0xFF),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }
}

impl Default for TerminalColor {
    fn default() -> Self {
        TerminalColor::Named(NamedColor::DarkGreen)
    }
}

impl From<NamedColor> for TerminalColor {
    fn from(color: NamedColor) -> Self {
        TerminalColor::Named(color)
    }
}

impl From<Rgb> for TerminalColor {
    fn from(color: Rgb) -> Self {
        TerminalColor::Rgb(color)
    }
}

impl TerminalColor {
    pub const BLACK: TerminalColor = TerminalColor::Named(NamedColor::Black);
    pub const DARK_GREEN: TerminalColor = TerminalColor::Named(NamedColor::DarkGreen);

    /// Convert a legacy color code (`§a` style, without the prefix) to a color
    pub fn from_legacy_code(code: char) -> Option<Self> {
        let index = code.to_ascii_lowercase().to_digit(16)?;
        NamedColor::ALL
            .get(index as usize)
            .copied()
            .map(TerminalColor::Named)
    }

    /// Look up a color by legacy name (`dark_green`, `DARK GREEN`, `light-purple`)
    /// or by `#RRGGBB` hex.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.starts_with('#') {
            return Rgb::from_hex(trimmed).map(TerminalColor::Rgb);
        }
        let normalized = trimmed.to_ascii_lowercase().replace([' ', '-'], "_");
        let normalized = match normalized.as_str() {
            "grey" => "gray",
            "dark_grey" => "dark_gray",
            other => other,
        };
        NamedColor::ALL
            .iter()
            .find(|c| c.name() == normalized)
            .copied()
            .map(TerminalColor::Named)
    }

    /// Convert to RGB values for the surface
    pub fn to_rgb(self) -> Rgb {
        match self {
            TerminalColor::Named(named) => named.to_rgb(),
            TerminalColor::Rgb(rgb) => rgb,
        }
    }
}

impl FromStr for TerminalColor {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| TerminalError::InvalidConfiguration(format!("unknown color: {s:?}")))
    }
}

impl fmt::Display for TerminalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalColor::Named(named) => f.write_str(named.name()),
            TerminalColor::Rgb(rgb) => fmt::Display::fmt(rgb, f),
        }
    }
}
