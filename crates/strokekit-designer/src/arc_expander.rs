//! Arc Expander
//!
//! Converts fitted arcs to short line segments for output formats that only
//! carry polylines (SVG paths, DXF polylines, raster strokes).

use strokekit_core::Point;

use crate::toolpath::{ArcSegment, PathSegment};

/// Arc expansion configuration
#[derive(Debug, Clone)]
pub struct ArcExpanderConfig {
    /// Maximum segment length
    pub segment_length: f64,
    /// Lower bound on the number of segments per arc
    pub min_segments: usize,
    /// Upper bound on the number of segments per arc
    pub max_segments: usize,
}

impl Default for ArcExpanderConfig {
    fn default() -> Self {
        Self {
            segment_length: 0.25,
            min_segments: 4,
            max_segments: 128,
        }
    }
}

/// Converts arcs to line segments
#[derive(Debug, Clone, Default)]
pub struct ArcExpander {
    config: ArcExpanderConfig,
}

impl ArcExpander {
    /// Create a new arc expander
    pub fn new(config: ArcExpanderConfig) -> Self {
        Self { config }
    }

    /// Number of line segments used for `arc`.
    pub fn segment_count(&self, arc: &ArcSegment) -> usize {
        let step = if self.config.segment_length > 0.0 {
            self.config.segment_length
        } else {
            ArcExpanderConfig::default().segment_length
        };
        let wanted = (arc.length() / step).ceil() as usize;
        wanted.clamp(self.config.min_segments.max(1), self.config.max_segments.max(1))
    }

    /// Expand an arc into points following its start, ending exactly at its end
    pub fn expand_arc(&self, arc: &ArcSegment) -> Vec<Point> {
        let count = self.segment_count(arc);
        let start_angle = arc.start.angle_from(&arc.center);

        let mut points = Vec::with_capacity(count);
        for i in 1..count {
            let fraction = i as f64 / count as f64;
            let angle = start_angle + arc.sweep * fraction;
            points.push(Point::new(
                arc.center.x + arc.radius * angle.cos(),
                arc.center.y + arc.radius * angle.sin(),
            ));
        }
        points.push(arc.end);
        points
    }

    /// Flattens a segment chain into a single polyline.
    pub fn flatten(&self, segments: &[PathSegment]) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for segment in segments {
            match segment {
                PathSegment::Line(run) => {
                    for p in run {
                        if points.last() != Some(p) {
                            points.push(*p);
                        }
                    }
                }
                PathSegment::Arc(arc) => {
                    if points.last() != Some(&arc.start) {
                        points.push(arc.start);
                    }
                    points.extend(self.expand_arc(arc));
                }
            }
        }
        points
    }
}
