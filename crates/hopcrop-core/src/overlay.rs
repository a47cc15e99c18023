//! Pixel-selection overlay contract.
//!
//! The overlay is the draggable crop widget drawn over the shared image. It
//! is an external collaborator: this module only describes how it is
//! configured and how it reports selections back.
//!
//! Live drag updates and the final selection are delivered to the same
//! [`SelectionSink`], so the stored value is identical whichever event fired
//! last.

use serde::Serialize;

use crate::error::CropError;
use crate::rect::Rect;
use crate::settings::RegionSettings;

/// Configuration handed to the overlay when a region activates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayConfig {
    /// Width / height lock, absent when the style does not protect it.
    pub aspect_ratio: Option<f64>,
    /// Minimum selection size in display pixels, `0` meaning none.
    pub min_size: [i64; 2],
    /// Initial selection in display pixels.
    pub set_select: Option<[i64; 4]>,
}

impl OverlayConfig {
    /// Derive the overlay configuration from region settings and the current
    /// stored field value.
    ///
    /// A malformed stored value is treated like an empty one: the overlay
    /// starts without a selection.
    pub fn derive(settings: &RegionSettings, field_value: &str) -> Self {
        let set_select = if field_value.is_empty() {
            None
        } else {
            match field_value.parse::<Rect>() {
                Ok(stored) => Some(settings.display_factor.rect_to_display(stored).to_array()),
                Err(e) => {
                    log::warn!("Ignoring malformed crop value {:?}: {}", field_value, e);
                    None
                }
            }
        };

        Self {
            aspect_ratio: settings.enforced_aspect_ratio(),
            min_size: settings.min_display_size(),
            set_select,
        }
    }
}

/// Receives selections from the overlay in display pixels.
pub trait SelectionSink {
    fn selection_changed(&mut self, display: Rect);
}

/// A live overlay instance.
pub trait OverlayHandle {
    /// Replace the current selection (display pixels).
    fn set_select(&mut self, display: Rect);

    /// Tear the overlay down. Safe to call mid-drag.
    fn destroy(&mut self);
}

/// The shared image, able to host one overlay at a time.
pub trait OverlayBackend {
    type Handle: OverlayHandle;

    /// Attach an overlay to the image. Errors from the widget propagate.
    fn attach<S>(&mut self, config: &OverlayConfig, sink: S) -> Result<Self::Handle, CropError>
    where
        S: SelectionSink + 'static;
}
