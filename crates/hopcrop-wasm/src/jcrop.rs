//! Jcrop overlay bindings.
//!
//! The pixel-selection overlay is the jQuery Jcrop widget. It is attached to
//! the context's `<img>` and reports selections through `onChange` (while
//! dragging) and `onSelect` (on release); both go to the same closure.

use hopcrop_core::{CropError, OverlayBackend, OverlayConfig, OverlayHandle, Rect, SelectionSink};
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::types::{describe_js, JcropOptions, JsCoords};

#[wasm_bindgen]
extern "C" {
    /// The API object returned by `jQuery.Jcrop`.
    pub type JcropApi;

    #[wasm_bindgen(catch, js_namespace = jQuery, js_name = Jcrop)]
    fn jcrop(image: &HtmlImageElement, options: &JsValue) -> Result<JcropApi, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &JcropApi);

    #[wasm_bindgen(method, js_name = setSelect)]
    fn set_select(this: &JcropApi, coords: &Array);
}

type SelectionCallback = Closure<dyn FnMut(JsValue)>;

/// The crop image, able to host one Jcrop instance at a time.
pub struct JcropBackend {
    image: HtmlImageElement,
}

impl JcropBackend {
    pub fn new(image: HtmlImageElement) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }
}

impl OverlayBackend for JcropBackend {
    type Handle = JcropHandle;

    fn attach<S>(&mut self, config: &OverlayConfig, sink: S) -> Result<JcropHandle, CropError>
    where
        S: SelectionSink + 'static,
    {
        let options = serde_wasm_bindgen::to_value(&JcropOptions::from(config))
            .map_err(|e| CropError::Overlay(e.to_string()))?;

        let mut sink = sink;
        let callback = SelectionCallback::new(move |coords: JsValue| {
            match serde_wasm_bindgen::from_value::<JsCoords>(coords) {
                Ok(coords) => sink.selection_changed(coords.into()),
                Err(e) => log::warn!("Ignoring overlay coordinates: {}", e),
            }
        });

        for key in ["onChange", "onSelect"] {
            Reflect::set(&options, &JsValue::from_str(key), callback.as_ref())
                .map_err(|e| CropError::Overlay(describe_js(&e)))?;
        }

        let api = jcrop(&self.image, &options).map_err(|e| CropError::Overlay(describe_js(&e)))?;

        Ok(JcropHandle {
            api,
            _callback: callback,
        })
    }
}

/// A live Jcrop instance.
///
/// Owns the selection callback, which must outlive the widget.
pub struct JcropHandle {
    api: JcropApi,
    _callback: SelectionCallback,
}

impl OverlayHandle for JcropHandle {
    fn set_select(&mut self, display: Rect) {
        let coords: Array = display
            .to_array()
            .iter()
            .map(|v| JsValue::from_f64(*v as f64))
            .collect();
        self.api.set_select(&coords);
    }

    fn destroy(&mut self) {
        self.api.destroy();
    }
}
