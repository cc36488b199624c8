//! Geometry primitives shared across the pipeline.

use serde::{Deserialize, Serialize};

/// A 2D point in design or output units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of `self` around `center`, in radians.
    pub fn angle_from(&self, center: &Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Perpendicular distance from `self` to the line through `start` and `end`.
    ///
    /// Falls back to the distance to `start` when the chord is degenerate.
    pub fn distance_to_chord(&self, start: &Point, end: &Point) -> f64 {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq < 1e-12 {
            return self.distance_to(start);
        }
        ((dx * (start.y - self.y)) - ((start.x - self.x) * dy)).abs() / len_sq.sqrt()
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Computes the bounds of all points, or `None` when there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// True when the box encloses no area and no extent on either axis.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }
}

/// Vertical orientation of an output coordinate system.
///
/// Design space is y-down (canvas orientation). `Down` outputs keep that
/// orientation; `Up` outputs mirror it about the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    /// Top-left origin (SVG, raster images)
    Down,
    /// Bottom-left origin (machine coordinates, CAD)
    Up,
}

impl YAxis {
    /// Sign applied to design-space y offsets.
    pub fn sign(self) -> f64 {
        match self {
            YAxis::Down => 1.0,
            YAxis::Up => -1.0,
        }
    }

    /// Whether arc winding must be mirrored relative to design space.
    pub fn flips_winding(self) -> bool {
        matches!(self, YAxis::Up)
    }
}
