//! Host page collaborators.
//!
//! The host renders one text field per crop style and supplies the editing
//! context that scopes them. These traits describe only what the regions
//! and the coordinator need from the host; the browser implementation lives
//! in the `hopcrop-wasm` crate.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::CropError;
use crate::overlay::OverlayBackend;

lazy_static! {
    /// Trailing bracketed token of a field name, e.g. `image[crop][thumbnail]`.
    static ref STYLE_KEY: Regex = Regex::new(r"\[(\w+)\]$").expect("valid style key pattern");
}

/// Extract the style key from a field's name attribute.
pub fn style_key(field_name: &str) -> Option<&str> {
    STYLE_KEY
        .captures(field_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A text field that stores one region's rectangle.
pub trait HostField {
    /// The field's name attribute, if it has one.
    fn name(&self) -> Option<String>;

    fn value(&self) -> String;

    fn set_value(&mut self, value: &str);

    /// Remove the field's label from the page and return its text.
    fn take_label(&mut self) -> String;

    /// Hide the field. It stays in the form so it still submits.
    fn hide(&mut self);
}

/// Visual markers on a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavMarker {
    /// The region's overlay is currently shown.
    Active,
    /// The region has a stored rectangle.
    Filled,
}

impl NavMarker {
    /// CSS class used for the marker.
    pub fn class_name(self) -> &'static str {
        match self {
            NavMarker::Active => "active",
            NavMarker::Filled => "filled",
        }
    }
}

/// One entry in the navigation list.
pub trait NavItem {
    /// Set or clear a marker. Setting a marker twice is harmless.
    fn set_marker(&mut self, marker: NavMarker, on: bool);

    fn attach_warning(&mut self, text: &str);
}

/// The navigation list shared by all regions of a context.
pub trait Navigation {
    type Item: NavItem;

    /// Append an entry labeled `label`.
    fn append(&mut self, label: &str) -> Result<Self::Item, CropError>;
}

/// One image editing context: an image plus its crop fields.
pub trait EditingContext {
    type Field: HostField;
    type Nav: Navigation;
    type Backend: OverlayBackend;

    /// Identifier used to look up the context's settings.
    fn id(&self) -> String;

    /// Mark the context as processed. Returns `false` if it already was.
    fn claim(&mut self) -> bool;

    /// Find the single image the overlay attaches to.
    fn locate_image(&mut self) -> Option<Self::Backend>;

    /// Build the navigation container, placed before the image.
    fn create_navigation(&mut self) -> Result<Self::Nav, CropError>;

    /// Size the navigation to the image once layout has settled.
    fn schedule_height_sync(&mut self, nav: &Self::Nav);

    /// Text fields in the context, in document order.
    fn text_fields(&self) -> Vec<Self::Field>;
}
