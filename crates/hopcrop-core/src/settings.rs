//! Crop settings supplied by the host page.
//!
//! The page-level settings object is keyed by editing context id:
//!
//! ```text
//! { "<context id>": { display_factor: 0.5,
//!                     styles: { thumbnail: { width: 100, height: 100,
//!                                            min_width: 50,
//!                                            protect_aspect_ratio: true,
//!                                            warning: "..." } } } }
//! ```
//!
//! Settings are validated once when a coordinator is built. After that each
//! region works from a [`RegionSettings`] that carries the shared display
//! factor alongside its own style.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::scale::DisplayFactor;

/// Per-style crop configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Target width of the derived image, used for the aspect ratio.
    #[serde(default)]
    pub width: f64,
    /// Target height of the derived image, used for the aspect ratio.
    #[serde(default)]
    pub height: f64,
    /// Minimum crop width in native pixels.
    #[serde(default)]
    pub min_width: Option<f64>,
    /// Minimum crop height in native pixels.
    #[serde(default)]
    pub min_height: Option<f64>,
    /// Lock the selection to `width / height`.
    #[serde(default)]
    pub protect_aspect_ratio: bool,
    /// Advisory text shown under the navigation entry.
    #[serde(default)]
    pub warning: Option<String>,
}

impl StyleSettings {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// The `width / height` ratio, if both are usable.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// Settings for one image editing context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSettings {
    #[serde(default)]
    pub display_factor: DisplayFactor,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleSettings>,
}

impl CropSettings {
    pub fn new(display_factor: DisplayFactor) -> Self {
        Self {
            display_factor,
            styles: BTreeMap::new(),
        }
    }

    /// Builder-style helper to register a style.
    pub fn with_style(mut self, name: impl Into<String>, style: StyleSettings) -> Self {
        self.styles.insert(name.into(), style);
        self
    }

    /// Check the settings before any region is built.
    ///
    /// A style that protects its aspect ratio needs positive dimensions.
    pub fn validate(&self) -> Result<(), CropError> {
        DisplayFactor::new(self.display_factor.get())?;

        for (name, style) in &self.styles {
            if style.protect_aspect_ratio && style.aspect_ratio().is_none() {
                return Err(CropError::InvalidAspectRatio {
                    style: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Resolve a style by name, injecting the shared display factor.
    pub fn region_settings(&self, style: &str) -> Option<RegionSettings> {
        self.styles.get(style).map(|s| RegionSettings {
            style: s.clone(),
            display_factor: self.display_factor,
        })
    }
}

/// Page-level settings keyed by editing context id.
pub type SettingsBundle = HashMap<String, CropSettings>;

/// A style's settings plus the display factor of its editing context.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSettings {
    pub style: StyleSettings,
    pub display_factor: DisplayFactor,
}

impl RegionSettings {
    pub fn new(style: StyleSettings, display_factor: DisplayFactor) -> Self {
        Self {
            style,
            display_factor,
        }
    }

    /// Aspect ratio to enforce, only when protection is switched on.
    pub fn enforced_aspect_ratio(&self) -> Option<f64> {
        if self.style.protect_aspect_ratio {
            self.style.aspect_ratio()
        } else {
            None
        }
    }

    /// Minimum selection size in display pixels. Missing axes mean no minimum.
    pub fn min_display_size(&self) -> [i64; 2] {
        let scale = |min: Option<f64>| {
            min.map(|v| (v * self.display_factor.get()).floor() as i64)
                .unwrap_or(0)
        };
        [scale(self.style.min_width), scale(self.style.min_height)]
    }

    pub fn warning(&self) -> Option<&str> {
        self.style.warning.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(f: f64) -> DisplayFactor {
        DisplayFactor::new(f).unwrap()
    }

    #[test]
    fn test_min_size_independent_axes() {
        let mut style = StyleSettings::new(100.0, 100.0);
        style.min_width = Some(50.0);
        let region = RegionSettings::new(style, factor(2.0));
        assert_eq!(region.min_display_size(), [100, 0]);
    }

    #[test]
    fn test_min_size_defaults_to_zero() {
        let region = RegionSettings::new(StyleSettings::new(10.0, 10.0), factor(0.5));
        assert_eq!(region.min_display_size(), [0, 0]);
    }

    #[test]
    fn test_min_size_rounds_down() {
        let mut style = StyleSettings::new(10.0, 10.0);
        style.min_width = Some(15.0);
        style.min_height = Some(33.0);
        let region = RegionSettings::new(style, factor(0.5));
        assert_eq!(region.min_display_size(), [7, 16]);
    }

    #[test]
    fn test_aspect_ratio_only_when_protected() {
        let mut style = StyleSettings::new(200.0, 100.0);
        let region = RegionSettings::new(style.clone(), factor(1.0));
        assert_eq!(region.enforced_aspect_ratio(), None);

        style.protect_aspect_ratio = true;
        let region = RegionSettings::new(style, factor(1.0));
        assert_eq!(region.enforced_aspect_ratio(), Some(2.0));
    }

    #[test]
    fn test_validate_rejects_protected_zero_height() {
        let mut style = StyleSettings::new(100.0, 0.0);
        style.protect_aspect_ratio = true;
        let settings = CropSettings::new(factor(1.0)).with_style("thumb", style);
        assert_eq!(
            settings.validate(),
            Err(CropError::InvalidAspectRatio {
                style: "thumb".into()
            })
        );
    }

    #[test]
    fn test_validate_allows_unprotected_zero_height() {
        let settings =
            CropSettings::new(factor(1.0)).with_style("free", StyleSettings::new(0.0, 0.0));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_region_settings_injects_display_factor() {
        let settings = CropSettings::new(factor(0.25))
            .with_style("thumb", StyleSettings::new(100.0, 100.0));

        let region = settings.region_settings("thumb").unwrap();
        assert_eq!(region.display_factor, factor(0.25));
        assert!(settings.region_settings("other").is_none());
    }

    #[test]
    fn test_warning_accessor() {
        let mut style = StyleSettings::new(1.0, 1.0);
        assert_eq!(RegionSettings::new(style.clone(), factor(1.0)).warning(), None);
        style.warning = Some("Low resolution".into());
        assert_eq!(
            RegionSettings::new(style, factor(1.0)).warning(),
            Some("Low resolution")
        );
    }
}
