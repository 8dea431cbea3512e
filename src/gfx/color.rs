use super::geometry::ChannelOffsets;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A device-independent color with 8 bits per channel.
///
/// A `Color` only becomes something the display understands once it is
/// packed against a device's channel layout (see [`Color::pack`]).
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// A color laid out in a device's native pixel format.
pub struct PackedColor(pub u32);

/// The named colors drawing programs may refer to.
/// Names are matched exactly (case-sensitive).
pub const PALETTE: [(&str, Color); 9] = [
    ("negro", Color::new(0, 0, 0)),
    ("blanco", Color::new(255, 255, 255)),
    ("rojo", Color::new(255, 0, 0)),
    ("verde", Color::new(0, 255, 0)),
    ("azul", Color::new(0, 0, 255)),
    ("amarillo", Color::new(255, 255, 0)),
    ("cyan", Color::new(0, 255, 255)),
    ("magenta", Color::new(255, 0, 255)),
    ("marron", Color::new(139, 69, 19)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The outcome of looking a color up by name.
///
/// Unknown names still produce a usable color (black), but callers
/// can tell the fallback apart from a real match.
pub enum ColorLookup {
    Resolved(Color),
    Defaulted,
}

impl ColorLookup {
    pub fn color(self) -> Color {
        match self {
            ColorLookup::Resolved(color) => color,
            ColorLookup::Defaulted => Color::BLACK,
        }
    }

    pub fn is_defaulted(self) -> bool {
        self == ColorLookup::Defaulted
    }
}

/// Look up a palette color. Unknown names fall back to black.
pub fn color_by_name(name: &str) -> ColorLookup {
    PALETTE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map_or(ColorLookup::Defaulted, |(_, color)| {
            ColorLookup::Resolved(*color)
        })
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Pack this color using a device's channel bit offsets.
    ///
    /// A channel whose offset doesn't fit in 32 bits contributes nothing.
    pub fn pack(self, offsets: ChannelOffsets) -> PackedColor {
        PackedColor(
            shift(self.r, offsets.red) | shift(self.g, offsets.green) | shift(self.b, offsets.blue),
        )
    }
}

fn shift(channel: u8, offset: u32) -> u32 {
    u32::from(channel).checked_shl(offset).unwrap_or(0)
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not a palette name or #rrggbb color: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

// Accepts palette names and `#rrggbb`. Unlike `color_by_name`,
// unknown names are an error here.
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let ColorLookup::Resolved(color) = color_by_name(s) {
            return Ok(color);
        }

        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };

        Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
