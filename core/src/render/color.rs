//! RGBA colors and their hex forms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, lower-case. Alpha is never part of the hex form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Widen to 16 bits per channel (0xff maps to 0xffff)
    pub fn to_rgba16(&self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a].map(|c| u16::from(c) * 257)
    }

    /// Components as 0.0 to 1.0, for PDF color operators
    pub fn to_unit_rgb(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
            return Err(Error::Input(format!("invalid hex color: {}", s)));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::Input(format!("invalid hex color: {}", s)))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        if color.a == 255 {
            color.to_hex()
        } else {
            format!("{}{:02x}", color.to_hex(), color.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(*self))
    }
}

/// What light modules are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    White,
    Transparent,
}

impl Background {
    pub fn from_transparent(transparent: bool) -> Self {
        if transparent {
            Background::Transparent
        } else {
            Background::White
        }
    }

    pub fn color(self) -> Color {
        match self {
            Background::White => Color::WHITE,
            Background::Transparent => Color::TRANSPARENT,
        }
    }

    /// `None` when there is nothing to paint
    pub fn fill(self) -> Option<Color> {
        match self {
            Background::White => Some(Color::WHITE),
            Background::Transparent => None,
        }
    }
}
