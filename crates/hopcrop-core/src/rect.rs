//! Crop rectangles and their stored text form.
//!
//! A rectangle is stored in the host form field as `"x, y, x2, y2"` in native
//! image pixels. A rectangle that spans no area in either axis is the empty
//! sentinel and is stored as the empty string.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the image
//! - `(x, y)` is the top-left corner of the crop, `(x2, y2)` the bottom-right
//! - Which pixel space (display or native) a `Rect` lives in is decided by
//!   the caller; see [`crate::scale::DisplayFactor`] for the transform

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRectError;

/// An axis-aligned crop rectangle in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    /// The zero-area sentinel stored as an empty field.
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        x2: 0,
        y2: 0,
    };

    pub fn new(x: i64, y: i64, x2: i64, y2: i64) -> Self {
        Self { x, y, x2, y2 }
    }

    /// A rectangle is empty only when both axes collapse together.
    ///
    /// `{0, 0, 0, 10}` is a line, not an empty crop, and still gets stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == self.x2 && self.y == self.y2
    }

    pub fn width(&self) -> i64 {
        self.x2 - self.x
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y
    }

    /// The `[x, y, x2, y2]` shape the selection overlay consumes.
    pub fn to_array(self) -> [i64; 4] {
        [self.x, self.y, self.x2, self.y2]
    }

    pub fn from_array([x, y, x2, y2]: [i64; 4]) -> Self {
        Self { x, y, x2, y2 }
    }

    /// Apply `f` to every coordinate.
    pub fn map(self, f: impl Fn(i64) -> i64) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            x2: f(self.x2),
            y2: f(self.y2),
        }
    }

    /// Text written to the host field. Empty rectangles clear the field.
    pub fn to_field_value(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            self.to_string()
        }
    }

    /// Parse a stored value, treating anything malformed as empty.
    ///
    /// A form redisplayed with a corrupted value must not break the editor,
    /// so the bad value is logged and dropped instead of surfaced.
    pub fn parse_lenient(value: &str) -> Self {
        match value.parse() {
            Ok(rect) => rect,
            Err(e) => {
                log::warn!("Ignoring malformed crop value {:?}: {}", value, e);
                Rect::EMPTY
            }
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.x, self.y, self.x2, self.y2)
    }
}

impl FromStr for Rect {
    type Err = ParseRectError;

    /// Strict parse of `"x, y, x2, y2"`. Blank input is the empty rectangle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Rect::EMPTY);
        }

        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        if tokens.len() != 4 {
            return Err(ParseRectError::WrongTokenCount(tokens.len()));
        }

        let mut coords = [0i64; 4];
        for (slot, token) in coords.iter_mut().zip(&tokens) {
            *slot = token
                .parse()
                .map_err(|_| ParseRectError::InvalidToken((*token).to_string()))?;
        }

        Ok(Rect::from_array(coords))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
