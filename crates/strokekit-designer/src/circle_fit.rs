//! Algebraic least-squares circle fitting.
//!
//! Uses the Kasa formulation on mean-centred power sums, which reduces the
//! fit to a 2x2 linear system for the centre. The radius is the mean
//! distance of the input points to that centre.

use nalgebra::{Matrix2, Vector2};
use strokekit_core::Point;

/// Systems whose determinant magnitude falls below this are treated as collinear.
pub const DETERMINANT_EPSILON: f64 = 1e-10;

/// A fitted circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Distance from `p` to the circle outline.
    pub fn deviation(&self, p: &Point) -> f64 {
        (p.distance_to(&self.center) - self.radius).abs()
    }

    /// Largest deviation of any point from the outline.
    pub fn max_deviation(&self, points: &[Point]) -> f64 {
        points
            .iter()
            .map(|p| self.deviation(p))
            .fold(0.0, f64::max)
    }
}

/// Fits a circle to `points`, returning `None` for fewer than three points or
/// degenerate (collinear) input.
pub fn fit_circle(points: &[Point]) -> Option<Circle> {
    if points.len() < 3 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let (mut suu, mut svv, mut suv) = (0.0, 0.0, 0.0);
    let (mut suuu, mut svvv, mut suuv, mut suvv) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let u = p.x - mean_x;
        let v = p.y - mean_y;
        let (uu, vv) = (u * u, v * v);
        suu += uu;
        svv += vv;
        suv += u * v;
        suuu += uu * u;
        svvv += vv * v;
        suuv += uu * v;
        suvv += u * vv;
    }

    let system = Matrix2::new(suu, suv, suv, svv);
    if system.determinant().abs() < DETERMINANT_EPSILON {
        return None;
    }
    let rhs = Vector2::new(0.5 * (suuu + suvv), 0.5 * (svvv + suuv));
    let offset = system.try_inverse()? * rhs;

    let center = Point::new(mean_x + offset.x, mean_y + offset.y);
    if !center.is_finite() {
        return None;
    }
    let radius = points.iter().map(|p| p.distance_to(&center)).sum::<f64>() / n;

    Some(Circle { center, radius })
}
