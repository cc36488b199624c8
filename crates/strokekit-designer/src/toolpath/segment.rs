//! Path segment types produced by the arc segmenter.

use strokekit_core::Point;

/// A circular arc between two stroke points.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub radius: f64,
    pub clockwise: bool,
    /// Signed sweep from start to end in radians, in the segment's own frame.
    /// Negative sweeps run clockwise.
    pub sweep: f64,
}

impl ArcSegment {
    /// Arc length along the outline.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// Difference between the start and end distances to the centre.
    pub fn radius_mismatch(&self) -> f64 {
        (self.start.distance_to(&self.center) - self.end.distance_to(&self.center)).abs()
    }

    /// Applies `map` to every point and rescales the radius. `mirrored`
    /// reverses the winding for reflections.
    pub fn mapped<F>(&self, map: F, scale: f64, mirrored: bool) -> Self
    where
        F: Fn(Point) -> Point,
    {
        let (clockwise, sweep) = if mirrored {
            (!self.clockwise, -self.sweep)
        } else {
            (self.clockwise, self.sweep)
        };
        Self {
            start: map(self.start),
            end: map(self.end),
            center: map(self.center),
            radius: self.radius * scale,
            clockwise,
            sweep,
        }
    }
}

/// A classified piece of a stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A polyline through the original points.
    Line(Vec<Point>),
    /// A fitted circular arc.
    Arc(ArcSegment),
}

impl PathSegment {
    pub fn is_arc(&self) -> bool {
        matches!(self, PathSegment::Arc(_))
    }

    pub fn is_line(&self) -> bool {
        matches!(self, PathSegment::Line(_))
    }

    /// First point of the segment.
    pub fn start(&self) -> Option<Point> {
        match self {
            PathSegment::Line(points) => points.first().copied(),
            PathSegment::Arc(arc) => Some(arc.start),
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Option<Point> {
        match self {
            PathSegment::Line(points) => points.last().copied(),
            PathSegment::Arc(arc) => Some(arc.end),
        }
    }
}
