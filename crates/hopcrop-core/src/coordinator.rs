//! Coordination of the crop regions that share one image.
//!
//! The coordinator owns the image and the navigation list, builds one region
//! per recognized field and keeps at most one region's overlay on screen.
//!
//! # Switching Protocol
//!
//! Switching tools always deactivates every region first and only then
//! activates the requested one. Each region's own guards make both steps
//! no-ops where nothing needs to change, so after construction and after
//! every successful switch exactly one region is active.

use crate::error::CropError;
use crate::host::{style_key, EditingContext, HostField, Navigation};
use crate::overlay::OverlayBackend;
use crate::region::Region;
use crate::settings::CropSettings;

/// The region type built for an editing context.
pub type ContextRegion<C> = Region<
    <C as EditingContext>::Field,
    <<C as EditingContext>::Nav as Navigation>::Item,
    <<C as EditingContext>::Backend as OverlayBackend>::Handle,
>;

/// All crop regions of one image editing context.
pub struct Coordinator<C: EditingContext> {
    backend: C::Backend,
    navigation: C::Nav,
    regions: Vec<ContextRegion<C>>,
}

impl<C> Coordinator<C>
where
    C: EditingContext,
    C::Field: Clone + 'static,
    <C::Nav as Navigation>::Item: Clone + 'static,
{
    /// Build the regions for `ctx` and activate the first one.
    ///
    /// Fields whose style key has no entry in `settings.styles` are skipped.
    /// Fails with [`CropError::MissingImage`] if the context has no image,
    /// in which case nothing has been added to the page.
    pub fn new(ctx: &mut C, settings: &CropSettings) -> Result<Self, CropError> {
        settings.validate()?;

        let backend = ctx.locate_image().ok_or(CropError::MissingImage)?;
        let mut navigation = ctx.create_navigation()?;
        ctx.schedule_height_sync(&navigation);

        let mut regions: Vec<ContextRegion<C>> = Vec::new();
        for field in ctx.text_fields() {
            let Some(name) = field.name() else {
                continue;
            };
            let Some(key) = style_key(&name) else {
                continue;
            };
            let Some(region_settings) = settings.region_settings(key) else {
                log::debug!("No crop style configured for field '{}'", name);
                continue;
            };
            if regions.iter().any(|r| r.name() == key) {
                log::warn!("Duplicate crop style '{}' in field '{}'", key, name);
                continue;
            }

            regions.push(Region::new(key, region_settings, field, &mut navigation)?);
        }

        log::debug!(
            "Discovered {} crop region(s) in context '{}'",
            regions.len(),
            ctx.id()
        );

        let mut coordinator = Self {
            backend,
            navigation,
            regions,
        };
        if let Some(first) = coordinator.regions.first_mut() {
            first.activate(&mut coordinator.backend)?;
        }
        Ok(coordinator)
    }

    /// Switch the active tool to the region named `name`.
    ///
    /// Returns `Ok(false)` without touching anything if that region is
    /// already active.
    pub fn switch_to(&mut self, name: &str) -> Result<bool, CropError> {
        let index = self
            .position(name)
            .ok_or_else(|| CropError::UnknownStyle(name.to_string()))?;
        if self.regions[index].is_active() {
            return Ok(false);
        }

        self.deactivate_all();
        self.regions[index].activate(&mut self.backend)?;
        Ok(true)
    }

    /// Deactivate the active tool and release the context.
    pub fn teardown(self) {
        drop(self);
    }
}

impl<C: EditingContext> Coordinator<C> {
    /// Deactivate every region.
    pub fn deactivate_all(&mut self) {
        for region in &mut self.regions {
            region.deactivate();
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.name() == name)
    }

    /// The currently active region, if any.
    pub fn active(&self) -> Option<&ContextRegion<C>> {
        self.regions.iter().find(|r| r.is_active())
    }

    pub fn region(&self, name: &str) -> Option<&ContextRegion<C>> {
        self.position(name).map(|i| &self.regions[i])
    }

    pub fn region_mut(&mut self, name: &str) -> Option<&mut ContextRegion<C>> {
        self.position(name).map(move |i| &mut self.regions[i])
    }

    /// Regions in discovery order.
    pub fn regions(&self) -> &[ContextRegion<C>] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The image regions attach their overlay to.
    pub fn backend(&self) -> &C::Backend {
        &self.backend
    }

    pub fn navigation(&self) -> &C::Nav {
        &self.navigation
    }
}

impl<C: EditingContext> Drop for Coordinator<C> {
    fn drop(&mut self) {
        self.deactivate_all();
    }
}
