//! Annotation colors parsed from `#RRGGBB`.

use super::parse::ParseError;
use crate::imaging::ChannelOrder;
use crate::imaging::calculations::luma;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, hex digits in either case. Anything else, including
    /// surrounding whitespace or the three-digit short form, is an error.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::Color(input.to_string());
        let hex = input.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Samples in the given buffer order.
    pub fn in_order(self, order: ChannelOrder) -> [u8; 3] {
        order.arrange([self.r, self.g, self.b])
    }

    /// The gray level this color becomes on a single-channel buffer.
    pub fn luma(self) -> u8 {
        luma(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
