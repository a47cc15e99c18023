//! WASM-compatible wrapper types for crop data.
//!
//! This module handles the conversion between JavaScript values and the core
//! HopCrop types: the settings object handed over by the page, the
//! coordinates reported by the overlay widget, and the options passed to it.

use hopcrop_core::{CropError, OverlayConfig, Rect, SettingsBundle};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Coordinates reported by the overlay widget in display pixels.
///
/// Jcrop reports `w`/`h` as well; only the corners are used.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct JsCoords {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
}

impl From<JsCoords> for Rect {
    fn from(c: JsCoords) -> Self {
        Rect::new(
            c.x.floor() as i64,
            c.y.floor() as i64,
            c.x2.floor() as i64,
            c.y2.floor() as i64,
        )
    }
}

/// The serializable part of the Jcrop options object.
///
/// `onChange` and `onSelect` are closures and get set on the resulting
/// object separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JcropOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    pub min_size: [i64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_select: Option<[i64; 4]>,
}

impl From<&OverlayConfig> for JcropOptions {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            aspect_ratio: config.aspect_ratio,
            min_size: config.min_size,
            set_select: config.set_select,
        }
    }
}

/// Parse the page-level settings object, keyed by context id.
pub(crate) fn settings_from_js(value: JsValue) -> Result<SettingsBundle, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop settings: {}", e)))
}

/// Convert a core error for the JavaScript side.
pub(crate) fn to_js_error(error: CropError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Describe a JavaScript exception as a core overlay or host error message.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
