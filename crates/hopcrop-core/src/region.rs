//! A single named crop region.
//!
//! A region owns one style's host field, its navigation entry and, while
//! active, the overlay drawn over the shared image. It never touches another
//! region's field; switching between regions is the coordinator's job.

use crate::error::CropError;
use crate::host::{HostField, NavItem, NavMarker, Navigation};
use crate::overlay::{OverlayBackend, OverlayConfig, OverlayHandle, SelectionSink};
use crate::rect::Rect;
use crate::scale::DisplayFactor;
use crate::settings::RegionSettings;

/// Store a display-space selection into a field and update its marker.
///
/// The marker follows the stored text, so a selection that collapses to a
/// point once scaled back to native pixels clears both.
fn write_selection<F: HostField, N: NavItem>(
    field: &mut F,
    nav_item: &mut N,
    factor: DisplayFactor,
    display: Rect,
) {
    let value = factor.rect_to_native(display).to_field_value();
    field.set_value(&value);
    nav_item.set_marker(NavMarker::Filled, !value.is_empty());
}

/// Overlay sink writing selections straight into a region's field.
///
/// Holds its own handles to the field and navigation entry so overlay
/// callbacks never need to reach back into the region.
#[derive(Debug, Clone)]
pub struct SelectionWriter<F, N> {
    field: F,
    nav_item: N,
    factor: DisplayFactor,
}

impl<F: HostField, N: NavItem> SelectionSink for SelectionWriter<F, N> {
    fn selection_changed(&mut self, display: Rect) {
        write_selection(&mut self.field, &mut self.nav_item, self.factor, display);
    }
}

/// One crop style bound to its host field.
#[derive(Debug)]
pub struct Region<F, N, H> {
    name: String,
    settings: RegionSettings,
    field: F,
    nav_item: N,
    overlay: Option<H>,
}

impl<F, N, H> Region<F, N, H>
where
    F: HostField,
    N: NavItem,
    H: OverlayHandle,
{
    /// Bind a region to its field.
    ///
    /// The field's label moves into a new navigation entry and the field
    /// itself is hidden. The region starts inactive.
    pub fn new<V>(
        name: impl Into<String>,
        settings: RegionSettings,
        mut field: F,
        nav: &mut V,
    ) -> Result<Self, CropError>
    where
        V: Navigation<Item = N>,
    {
        let label = field.take_label();
        field.hide();

        let mut nav_item = nav.append(&label)?;
        if !field.value().is_empty() {
            nav_item.set_marker(NavMarker::Filled, true);
        }
        if let Some(warning) = settings.warning() {
            nav_item.attach_warning(warning);
        }

        Ok(Self {
            name: name.into(),
            settings,
            field,
            nav_item,
            overlay: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &RegionSettings {
        &self.settings
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn field_value(&self) -> String {
        self.field.value()
    }

    /// Stored rectangle in native pixels, empty if unset or malformed.
    pub fn rect(&self) -> Rect {
        Rect::parse_lenient(&self.field.value())
    }

    pub fn nav_item(&self) -> &N {
        &self.nav_item
    }

    /// Overlay configuration for the current settings and stored value.
    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig::derive(&self.settings, &self.field.value())
    }

    /// Store a selection reported in display pixels.
    ///
    /// Live drag updates and final selections both land here.
    pub fn select(&mut self, display: Rect) {
        write_selection(
            &mut self.field,
            &mut self.nav_item,
            self.settings.display_factor,
            display,
        );
    }

    /// Move the live overlay's selection. No-op while inactive.
    pub fn set_selection(&mut self, display: Rect) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_select(display);
        }
    }

    /// Show this region's overlay on the shared image.
    ///
    /// Does nothing if the region is already active. If the overlay fails
    /// to attach the error propagates and the region stays inactive.
    pub fn activate<B>(&mut self, backend: &mut B) -> Result<(), CropError>
    where
        B: OverlayBackend<Handle = H>,
        F: Clone + 'static,
        N: Clone + 'static,
    {
        if self.is_active() {
            return Ok(());
        }

        let config = self.overlay_config();
        let sink = SelectionWriter {
            field: self.field.clone(),
            nav_item: self.nav_item.clone(),
            factor: self.settings.display_factor,
        };
        let handle = backend.attach(&config, sink)?;

        self.nav_item.set_marker(NavMarker::Active, true);
        self.overlay = Some(handle);
        log::debug!("Activated crop region '{}'", self.name);
        Ok(())
    }

    /// Tear down this region's overlay. Does nothing if inactive.
    pub fn deactivate(&mut self) {
        let Some(mut overlay) = self.overlay.take() else {
            return;
        };

        overlay.destroy();
        self.nav_item.set_marker(NavMarker::Active, false);
        log::debug!("Deactivated crop region '{}'", self.name);
    }
}
