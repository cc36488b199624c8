//! Toolpath compilation.
//!
//! Every placed glyph's strokes are segmented into lines and arcs in design
//! units, then scaled and moved to their position on the page. Arc
//! classification therefore does not depend on the output size. All exporters
//! read the same [`CompiledText`], so placement cannot diverge between
//! formats.

mod segment;

pub use segment::{ArcSegment, PathSegment};

use strokekit_core::{Point, YAxis};
use tracing::debug;

use crate::arc_expander::ArcExpander;
use crate::arc_segmenter::{ArcSegmenter, ArcSegmenterConfig};
use crate::font::{Font, Glyph};
use crate::layout::{LayoutWarning, TextLayout};

/// Maps glyph design coordinates onto the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    /// Left edge of the character cell
    pub origin_x: f64,
    /// Baseline position in the output orientation
    pub baseline: f64,
    pub scale: f64,
    /// Left ink edge of the glyph in design units
    pub min_x: f64,
    pub y_axis: YAxis,
}

impl GlyphTransform {
    /// Design units to glyph-local output units, still y-down.
    pub fn to_local(&self, p: Point) -> Point {
        Point::new((p.x - self.min_x) * self.scale, p.y * self.scale)
    }

    /// Glyph-local output units to page coordinates.
    pub fn place(&self, local: Point) -> Point {
        Point::new(
            self.origin_x + local.x,
            self.baseline + self.y_axis.sign() * local.y,
        )
    }

    /// Design units straight to page coordinates.
    pub fn apply(&self, p: Point) -> Point {
        self.place(self.to_local(p))
    }

    /// Moves a design-space segment onto the page.
    pub fn apply_segment(&self, segment: &PathSegment) -> PathSegment {
        match segment {
            PathSegment::Line(points) => {
                PathSegment::Line(points.iter().map(|p| self.apply(*p)).collect())
            }
            PathSegment::Arc(arc) => PathSegment::Arc(arc.mapped(
                |p| self.apply(p),
                self.scale,
                self.y_axis.flips_winding(),
            )),
        }
    }
}

/// One stroke of one placed character.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStroke {
    pub character: char,
    pub segments: Vec<PathSegment>,
}

impl CompiledStroke {
    pub fn start(&self) -> Option<Point> {
        self.segments.first().and_then(PathSegment::start)
    }

    /// The stroke as a polyline, with arcs tessellated.
    pub fn polyline(&self, expander: &ArcExpander) -> Vec<Point> {
        expander.flatten(&self.segments)
    }
}

/// Page geometry ready for an encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledText {
    pub y_axis: YAxis,
    pub output_size: f64,
    pub width: f64,
    pub height: f64,
    pub strokes: Vec<CompiledStroke>,
    pub warnings: Vec<LayoutWarning>,
}

impl CompiledText {
    pub fn arc_count(&self) -> usize {
        self.segments().filter(|s| s.is_arc()).count()
    }

    pub fn line_count(&self) -> usize {
        self.segments().filter(|s| s.is_line()).count()
    }

    fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.strokes.iter().flat_map(|s| s.segments.iter())
    }
}

/// Turns a layout into placed line and arc segments.
#[derive(Debug, Clone, Default)]
pub struct ToolpathCompiler {
    segmenter: ArcSegmenter,
}

impl ToolpathCompiler {
    pub fn new(config: ArcSegmenterConfig) -> Self {
        Self {
            segmenter: ArcSegmenter::new(config),
        }
    }

    /// Compiler whose arcs must stay within `tolerance` design units.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self::new(ArcSegmenterConfig::with_tolerance(tolerance))
    }

    pub fn compile(&self, font: &Font, layout: &TextLayout, y_axis: YAxis) -> CompiledText {
        let mut strokes = Vec::new();

        for line in &layout.lines {
            let baseline = match y_axis {
                YAxis::Down => line.baseline,
                YAxis::Up => layout.height - line.baseline,
            };
            for placed in &line.glyphs {
                let Some(glyph) = font.glyph_for(placed.character) else {
                    continue;
                };
                let transform = GlyphTransform {
                    origin_x: placed.x,
                    baseline,
                    scale: layout.scale,
                    min_x: glyph.bounds.min_x,
                    y_axis,
                };
                self.compile_glyph(placed.character, glyph, &transform, &mut strokes);
            }
        }

        let compiled = CompiledText {
            y_axis,
            output_size: layout.output_size,
            width: layout.width,
            height: layout.height,
            strokes,
            warnings: layout.warnings.clone(),
        };
        debug!(
            strokes = compiled.strokes.len(),
            arcs = compiled.arc_count(),
            lines = compiled.line_count(),
            "compiled text"
        );
        compiled
    }

    fn compile_glyph(
        &self,
        character: char,
        glyph: &Glyph,
        transform: &GlyphTransform,
        out: &mut Vec<CompiledStroke>,
    ) {
        for stroke in glyph.strokes.iter().filter(|s| !s.is_empty()) {
            let segments = self
                .segmenter
                .segment(stroke)
                .iter()
                .map(|segment| transform.apply_segment(segment))
                .collect();
            out.push(CompiledStroke {
                character,
                segments,
            });
        }
    }
}
