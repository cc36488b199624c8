//! Douglas-Peucker stroke simplification.
//!
//! Pointer-sampled strokes carry far more points than their shape needs.
//! The simplifier keeps the first and last point and every point that
//! deviates from its enclosing chord by more than the tolerance.

use strokekit_core::{GeometryError, Point};

/// Simplifies a stroke, clamping invalid tolerances to zero.
pub fn simplify_stroke(points: &[Point], tolerance: f64) -> Vec<Point> {
    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        0.0
    };
    simplify_with_tolerance(points, tolerance)
}

/// Simplifies a stroke, rejecting negative or non-finite tolerances.
pub fn try_simplify_stroke(points: &[Point], tolerance: f64) -> Result<Vec<Point>, GeometryError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(GeometryError::InvalidTolerance { value: tolerance });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinitePoint { index });
    }
    Ok(simplify_with_tolerance(points, tolerance))
}

fn simplify_with_tolerance(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    // Each entry is an inclusive index range whose endpoints are already kept.
    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let (chord_start, chord_end) = (points[start], points[end]);
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for (offset, p) in points[start + 1..end].iter().enumerate() {
            let dist = p.distance_to_chord(&chord_start, &chord_end);
            if dist > max_dist {
                max_dist = dist;
                max_idx = start + 1 + offset;
            }
        }

        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((max_idx, end));
            stack.push((start, max_idx));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}
