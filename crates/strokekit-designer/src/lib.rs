//! # StrokeKit Designer
//!
//! Turns freehand pen strokes into a compact single-line font and compiles
//! text set in that font into engraving toolpaths, drawings and images.
//!
//! ## Core Components
//!
//! ### Stroke Geometry
//! - **Simplification**: Douglas-Peucker reduction of pointer samples
//! - **Circle Fitting**: Algebraic least-squares circle fits
//! - **Arc Segmentation**: Line/arc classification of simplified strokes
//!
//! ### Font Model
//! - **Glyphs**: Strokes, bounds and advance widths per character
//! - **Kerning**: Ordered rules with single, list and range selectors
//! - **Editor Session**: Drawing lifecycle with undo/redo
//!
//! ### Output
//! - **Layout**: Word wrap, kerning and auto-fit sizing
//! - **Toolpath Compiler**: Shared placement for every exporter
//! - **Exporters**: G-code, SVG, DXF, PNG and SVG fonts
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── simplify (on stroke end)
//!   └── Font (glyphs, metrics, kerning)
//!
//! TextLayoutEngine (lines, size, glyph positions)
//!   └── ToolpathCompiler
//!         ├── ArcSegmenter ── circle_fit
//!         └── CompiledText ── gcode_gen / svg_export / dxf_export / raster_export
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strokekit_designer::{export_text, ExportConfig, ExportFormat, Font, LayoutConfig};
//!
//! let font = Font::from_json(&std::fs::read_to_string("font.json")?)?;
//! let gcode = export_text(
//!     &font,
//!     "HELLO",
//!     &LayoutConfig::default(),
//!     &ExportConfig::default(),
//!     ExportFormat::Gcode,
//! )?;
//! ```

pub mod arc_expander;
pub mod arc_segmenter;
pub mod circle_fit;
pub mod dxf_export;
pub mod export;
pub mod font;
pub mod gcode_gen;
pub mod history;
pub mod kerning;
pub mod layout;
pub mod raster_export;
pub mod session;
pub mod simplify;
pub mod svg_export;
pub mod svg_font;
pub mod toolpath;

pub use arc_expander::{ArcExpander, ArcExpanderConfig};
pub use arc_segmenter::{ArcSegmenter, ArcSegmenterConfig};
pub use circle_fit::{fit_circle, Circle};
pub use dxf_export::DxfExporter;
pub use export::{
    check_inputs, compile_text, export_text, export_to_path, ExportConfig, ExportFormat,
};
pub use font::{normalize, Font, FontMetrics, Glyph, Stroke};
pub use gcode_gen::GcodeEmitter;
pub use history::{EditHistory, GlyphEdit};
pub use kerning::{KernRule, KernSelector};
pub use layout::{
    LayoutConfig, LayoutLine, LayoutWarning, PlacedGlyph, TextLayout, TextLayoutEngine,
};
pub use raster_export::RasterExporter;
pub use session::{EditorSession, EditorSettings, ReferenceCanvas};
pub use simplify::{simplify_stroke, try_simplify_stroke};
pub use svg_export::SvgExporter;
pub use svg_font::SvgFontWriter;
pub use toolpath::{
    ArcSegment, CompiledStroke, CompiledText, GlyphTransform, PathSegment, ToolpathCompiler,
};

pub use strokekit_core::{BoundingBox, Point, Units, YAxis};
