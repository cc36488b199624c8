//! Error handling for StrokeKit
//!
//! Provides error types for every layer of the pipeline:
//! - Geometry errors (simplification and fitting input)
//! - Glyph errors (font data model mutations)
//! - Layout errors (invalid text layout configuration)
//! - Export errors (encoders and file output)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when numeric input to the stroke pipeline is unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A tolerance was negative or not finite
    #[error("Invalid tolerance: {value}")]
    InvalidTolerance {
        /// The rejected tolerance.
        value: f64,
    },

    /// A point carried a NaN or infinite coordinate
    #[error("Non-finite point at index {index}")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },
}

/// Glyph store error type
///
/// Represents rejected mutations of the font data model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlyphError {
    /// Advance widths must be positive and finite
    #[error("Invalid advance width for '{character}': {width}")]
    InvalidAdvance {
        /// The character whose advance was being set.
        character: char,
        /// The rejected width.
        width: f64,
    },

    /// Kerning rule could not be added
    #[error("Invalid kerning rule: {reason}")]
    InvalidKernRule {
        /// Why the rule was rejected.
        reason: String,
    },

    /// Kerning rule index out of range
    #[error("Kerning rule {index} does not exist (rules: {len})")]
    KernRuleNotFound {
        /// The requested index.
        index: usize,
        /// Number of rules stored.
        len: usize,
    },

    /// Font metrics violate the baseline ordering
    #[error("Invalid font metrics: {reason}")]
    InvalidMetrics {
        /// Why the metrics were rejected.
        reason: String,
    },

    /// Stroke was empty
    #[error("Stroke for '{character}' has no points")]
    EmptyStroke {
        /// The glyph the stroke was meant for.
        character: char,
    },

    /// No glyph is defined for the character
    #[error("Glyph '{character}' not found")]
    GlyphNotFound {
        /// The missing character.
        character: char,
    },

    /// An editing operation needs a selected character
    #[error("No character is selected")]
    NoActiveGlyph,

    /// Font data could not be decoded
    #[error("Font data error: {reason}")]
    Serialization {
        /// Decoder message.
        reason: String,
    },
}

/// Layout error type
///
/// Represents invalid text layout configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Output size must be positive and finite
    #[error("Invalid output size: {size}")]
    InvalidOutputSize {
        /// The rejected size.
        size: f64,
    },

    /// A layout parameter is out of range
    #[error("Invalid layout parameter '{name}': {value}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },
}

/// Export error type
///
/// Represents failures of the output encoders.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The font defines no glyphs
    #[error("Font has no glyphs to export")]
    EmptyFont,

    /// The input text is empty
    #[error("No text to export")]
    EmptyText,

    /// An export parameter is unusable
    #[error("Invalid export parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Raster encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// DXF encoding failed
    #[error("DXF error: {0}")]
    Dxf(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for StrokeKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Glyph store error
    #[error(transparent)]
    Glyph(#[from] GlyphError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error should be shown to the user as "nothing to export"
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            Error::Export(ExportError::EmptyFont) | Error::Export(ExportError::EmptyText)
        )
    }

    /// Check if this is a glyph store error
    pub fn is_glyph_error(&self) -> bool {
        matches!(self, Error::Glyph(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
