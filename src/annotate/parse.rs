//! Strict parsers for the free-form fields of an annotation form.
//!
//! Coordinates arrive as text such as `(120, 45)`. They are split and cast,
//! never evaluated: anything that is not exactly two signed integers is
//! rejected.
//!
//! Accepted point forms: `x, y`, `(x, y)`, `[x, y]`, with any surrounding
//! whitespace.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid color {0:?}: expected #RRGGBB")]
    Color(String),
    #[error("invalid coordinates {0:?}: expected (x, y) with integer x and y")]
    Point(String),
    #[error("invalid {field} {input:?}: expected a positive number")]
    Number { field: &'static str, input: String },
}

/// Integer pixel coordinates. May lie outside the image; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parse a coordinate pair such as `(10, -4)`.
///
/// # Examples
/// ```
/// # use imgtweak::annotate::{Point, parse_point};
/// assert_eq!(parse_point("(10, 20)").unwrap(), Point::new(10, 20));
/// assert_eq!(parse_point(" [ -5 ,7 ] ").unwrap(), Point::new(-5, 7));
/// assert!(parse_point("__import__('os')").is_err());
/// ```
pub fn parse_point(input: &str) -> Result<Point, ParseError> {
    let invalid = || ParseError::Point(input.to_string());
    let inner = strip_brackets(input.trim()).ok_or_else(invalid)?;

    let mut parts = inner.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let x = parse_coordinate(x).ok_or_else(invalid)?;
    let y = parse_coordinate(y).ok_or_else(invalid)?;
    Ok(Point { x, y })
}

/// Strip one matching pair of `()` or `[]`. Unbalanced brackets are `None`.
fn strip_brackets(s: &str) -> Option<&str> {
    let opens = s.starts_with('(') || s.starts_with('[');
    let closes = s.ends_with(')') || s.ends_with(']');
    match (opens, closes) {
        (false, false) => Some(s),
        (true, true) if s.len() >= 2 => {
            let matched = (s.starts_with('(') && s.ends_with(')'))
                || (s.starts_with('[') && s.ends_with(']'));
            matched.then(|| &s[1..s.len() - 1])
        }
        _ => None,
    }
}

fn parse_coordinate(s: &str) -> Option<i32> {
    let s = s.trim();
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a strictly positive, finite number (radius, text scale).
pub fn parse_positive(field: &'static str, input: &str) -> Result<f32, ParseError> {
    let invalid = || ParseError::Number {
        field,
        input: input.to_string(),
    };
    let value: f32 = input.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// [`parse_positive`] for a circle radius.
pub fn parse_radius(input: &str) -> Result<f32, ParseError> {
    parse_positive("radius", input)
}
