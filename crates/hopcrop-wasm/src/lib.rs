//! HopCrop WASM - WebAssembly bindings for HopCrop
//!
//! This crate wires the hopcrop-core crop region coordination to the browser:
//! form fields and navigation are real DOM elements and the selection overlay
//! is the jQuery Jcrop widget.
//!
//! # Module Structure
//!
//! - `editor` - The attach-on-load entry point and the editors it returns
//! - `dom` - DOM implementations of the host collaborators
//! - `jcrop` - Jcrop overlay bindings
//! - `types` - Conversions between JavaScript values and core types
//! - `logging` - `log` backend for the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { attach, set_log_level } from '@hopcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const editors = attach(document.body, drupalSettings.HopCrop);
//! ```

use wasm_bindgen::prelude::*;

mod dom;
mod editor;
mod jcrop;
mod logging;
mod types;

// Re-export public types
pub use dom::{DomContext, DomField, DomNavItem, DomNavigation};
pub use editor::{attach, JsCropEditors};
pub use jcrop::{JcropBackend, JcropHandle};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Warn);
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid log level: {}", level)))?;
    logging::init(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
