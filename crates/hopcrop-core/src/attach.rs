//! Attach crop editing to the contexts found on a page.
//!
//! The host calls [`attach`] on page load (and again whenever new content is
//! inserted). Each context is processed at most once; the once-marker lives
//! on the context itself, so no state is kept between calls.

use crate::coordinator::Coordinator;
use crate::error::CropError;
use crate::host::{EditingContext, Navigation};
use crate::settings::SettingsBundle;

/// Build a coordinator for every unprocessed context.
///
/// Contexts without settings or without an image are skipped, as are
/// contexts whose settings fail validation. Overlay failures propagate;
/// coordinators built before the failure are dropped, which destroys their
/// overlays.
pub fn attach<C, I>(contexts: I, bundle: &SettingsBundle) -> Result<Vec<Coordinator<C>>, CropError>
where
    C: EditingContext,
    C::Field: Clone + 'static,
    <C::Nav as Navigation>::Item: Clone + 'static,
    I: IntoIterator<Item = C>,
{
    let mut coordinators = Vec::new();

    for mut ctx in contexts {
        if !ctx.claim() {
            continue;
        }

        let id = ctx.id();
        let Some(settings) = bundle.get(&id) else {
            log::debug!("{}", CropError::MissingSettings { context: id });
            continue;
        };

        match Coordinator::new(&mut ctx, settings) {
            Ok(coordinator) => coordinators.push(coordinator),
            Err(CropError::MissingImage) => {
                log::debug!("Skipping crop context '{}': no image", id);
            }
            Err(e @ (CropError::InvalidDisplayFactor(_) | CropError::InvalidAspectRatio { .. })) => {
                log::warn!("Skipping crop context '{}': {}", id, e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(coordinators)
}
