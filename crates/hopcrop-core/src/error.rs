//! Error types for crop region coordination.

use thiserror::Error;

/// Errors raised while setting up or driving crop regions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The editing context has no image to attach the overlay to.
    #[error("No crop image found in editing context")]
    MissingImage,

    /// No settings were supplied for the editing context.
    #[error("No crop settings for context: {context}")]
    MissingSettings { context: String },

    /// The display factor must be finite and greater than zero.
    #[error("Invalid display factor: {0}")]
    InvalidDisplayFactor(f64),

    /// Aspect ratio protection was requested without usable dimensions.
    #[error("Style '{style}' protects its aspect ratio but has no usable width/height")]
    InvalidAspectRatio { style: String },

    /// A style name that no region in the coordinator carries.
    #[error("Unknown crop style: {0}")]
    UnknownStyle(String),

    /// The host page could not build an element the editor needs.
    #[error("Host error: {0}")]
    Host(String),

    /// The pixel-selection overlay failed to attach.
    #[error("Overlay error: {0}")]
    Overlay(String),
}

/// Errors raised by strict parsing of a stored rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRectError {
    /// The value did not split into exactly four comma-separated tokens.
    #[error("Expected 4 coordinates, found {0}")]
    WrongTokenCount(usize),

    /// A token was not an integer.
    #[error("Invalid coordinate: '{0}'")]
    InvalidToken(String),
}
