//! # StrokeKit Core
//!
//! Shared geometry types, unit handling and error definitions used by the
//! designer, exporters and settings crates.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, ExportError, GeometryError, GlyphError, LayoutError, Result};
pub use geometry::{BoundingBox, Point, YAxis};
pub use units::Units;
