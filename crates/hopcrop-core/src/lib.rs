//! HopCrop Core - Crop region coordination
//!
//! This crate provides the host-independent logic for editing several named
//! crop rectangles ("styles") over one shared image, including the display
//! to native pixel transform, the stored text format of a rectangle, and the
//! coordinator that keeps exactly one crop tool active at a time.
//!
//! # Module Structure
//!
//! - `rect` - Crop rectangles and their stored text form
//! - `scale` - Display factor transform between display and native pixels
//! - `settings` - Per-context and per-style configuration
//! - `overlay` - Contract with the pixel-selection overlay widget
//! - `host` - Contract with the host page (fields, navigation, context)
//! - `region` - A single crop region bound to its field
//! - `coordinator` - Mutual exclusion across the regions of one image
//! - `attach` - Attach-on-load entry point over many contexts

pub mod attach;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod overlay;
pub mod rect;
pub mod region;
pub mod scale;
pub mod settings;

#[cfg(test)]
mod mock;

pub use attach::attach;
pub use coordinator::{ContextRegion, Coordinator};
pub use error::{CropError, ParseRectError};
pub use host::{style_key, EditingContext, HostField, NavItem, NavMarker, Navigation};
pub use overlay::{OverlayBackend, OverlayConfig, OverlayHandle, SelectionSink};
pub use rect::Rect;
pub use region::{Region, SelectionWriter};
pub use scale::DisplayFactor;
pub use settings::{CropSettings, RegionSettings, SettingsBundle, StyleSettings};
