//! Transform between display pixels and native image pixels.
//!
//! The editor shows the image scaled by a display factor. The overlay reports
//! selections in display pixels while the form stores native pixels:
//!
//! - native → display: `floor(native * factor)`
//! - display → native: `floor(display / factor)`
//!
//! Both directions round down, so a round trip can lose up to one factor's
//! worth of pixels when the factor is not 1.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::rect::Rect;

/// Scale between display pixels and native image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DisplayFactor(f64);

impl DisplayFactor {
    /// The identity transform.
    pub const IDENTITY: DisplayFactor = DisplayFactor(1.0);

    /// Create a display factor. It must be finite and greater than zero.
    pub fn new(factor: f64) -> Result<Self, CropError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(CropError::InvalidDisplayFactor(factor))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_display(self, native: i64) -> i64 {
        (native as f64 * self.0).floor() as i64
    }

    #[inline]
    pub fn to_native(self, display: i64) -> i64 {
        (display as f64 / self.0).floor() as i64
    }

    pub fn rect_to_display(self, native: Rect) -> Rect {
        native.map(|v| self.to_display(v))
    }

    pub fn rect_to_native(self, display: Rect) -> Rect {
        display.map(|v| self.to_native(v))
    }
}

impl Default for DisplayFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<f64> for DisplayFactor {
    type Error = CropError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayFactor> for f64 {
    fn from(factor: DisplayFactor) -> Self {
        factor.0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
