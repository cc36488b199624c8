//! Line/arc classification of simplified strokes.
//!
//! Walks a stroke and, from each position, searches a bounded window of end
//! points (farthest first) for a sub-sequence that is convincingly circular.
//! Candidates are rejected when they are straight, shaped like a corner,
//! badly fitted, too short in sweep, or nearly flat. Runs that do not form
//! an arc are merged into polyline segments.

use std::f64::consts::PI;

use strokekit_core::Point;
use tracing::debug;

use crate::circle_fit::fit_circle;
use crate::toolpath::{ArcSegment, PathSegment};

/// Strokes shorter than this are emitted as a single line.
pub const MIN_STROKE_POINTS: usize = 5;

/// Arc segmentation configuration
#[derive(Debug, Clone)]
pub struct ArcSegmenterConfig {
    /// Maximum distance between any point and the fitted circle
    pub tolerance: f64,
    /// How many points past the start a candidate arc may reach
    pub search_window: usize,
    /// Smallest accepted radius
    pub min_radius: f64,
    /// Largest accepted radius
    pub max_radius: f64,
    /// Smallest accepted angular span, in degrees
    pub min_sweep_degrees: f64,
    /// Arc length divided by chord length must reach this ratio
    pub min_arc_chord_ratio: f64,
    /// Turn between consecutive steps below which they count as parallel, in degrees
    pub parallel_degrees: f64,
    /// Turn between consecutive steps that marks a corner, in degrees
    pub corner_degrees: f64,
}

impl Default for ArcSegmenterConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            search_window: 20,
            min_radius: 0.5,
            max_radius: 50.0,
            min_sweep_degrees: 20.0,
            min_arc_chord_ratio: 1.05,
            parallel_degrees: 2.0,
            corner_degrees: 30.0,
        }
    }
}

impl ArcSegmenterConfig {
    /// Create a configuration with the given fit tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

/// Splits strokes into line and arc segments.
#[derive(Debug, Clone, Default)]
pub struct ArcSegmenter {
    config: ArcSegmenterConfig,
}

impl ArcSegmenter {
    pub fn new(config: ArcSegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArcSegmenterConfig {
        &self.config
    }

    /// Segments one stroke.
    pub fn segment(&self, points: &[Point]) -> Vec<PathSegment> {
        if points.len() < MIN_STROKE_POINTS {
            return vec![PathSegment::Line(points.to_vec())];
        }

        let last = points.len() - 1;
        let mut segments: Vec<PathSegment> = Vec::new();
        let mut i = 0;

        while i < last {
            let farthest = (i + self.config.search_window).min(last);
            let mut found = None;
            if farthest >= i + 3 {
                for j in (i + 3..=farthest).rev() {
                    if let Some(arc) = self.try_arc(&points[i..=j]) {
                        found = Some((arc, j));
                        break;
                    }
                }
            }

            match found {
                Some((arc, j)) => {
                    segments.push(PathSegment::Arc(arc));
                    i = j;
                }
                None => {
                    match segments.last_mut() {
                        Some(PathSegment::Line(run)) => run.push(points[i + 1]),
                        _ => segments.push(PathSegment::Line(vec![points[i], points[i + 1]])),
                    }
                    i += 1;
                }
            }
        }

        debug!(
            points = points.len(),
            arcs = segments.iter().filter(|s| s.is_arc()).count(),
            lines = segments.iter().filter(|s| s.is_line()).count(),
            "segmented stroke"
        );
        segments
    }

    /// Attempts to classify `run` as a single arc.
    fn try_arc(&self, run: &[Point]) -> Option<ArcSegment> {
        if self.is_straight_or_cornered(run) {
            return None;
        }

        let circle = fit_circle(run)?;
        if circle.radius < self.config.min_radius || circle.radius > self.config.max_radius {
            return None;
        }

        let worst = circle.max_deviation(run);
        if worst > self.config.tolerance {
            return None;
        }
        // Vertices alone can sit on a circle while the edges between them
        // cut well inside it (the corners of a square).
        let worst_step = run
            .windows(2)
            .map(|w| {
                let mid = Point::new((w[0].x + w[1].x) * 0.5, (w[0].y + w[1].y) * 0.5);
                circle.deviation(&mid)
            })
            .fold(0.0, f64::max);
        if worst_step > self.config.tolerance {
            return None;
        }

        let start = run[0];
        let end = run[run.len() - 1];
        let start_angle = start.angle_from(&circle.center);
        let angle = normalize_angle(end.angle_from(&circle.center) - start_angle);
        if angle.abs() < self.config.min_sweep_degrees.to_radians() {
            return None;
        }

        let chord = start.distance_to(&end);
        if chord < f64::EPSILON {
            return None;
        }
        let arc_length = circle.radius * angle.abs();
        if arc_length / chord < self.config.min_arc_chord_ratio {
            return None;
        }

        let mid = run[run.len() / 2];
        let clockwise = normalize_angle(mid.angle_from(&circle.center) - start_angle) < 0.0;
        let sweep = match (clockwise, angle > 0.0) {
            (true, true) => angle - 2.0 * PI,
            (false, false) => angle + 2.0 * PI,
            _ => angle,
        };

        Some(ArcSegment {
            start,
            end,
            center: circle.center,
            radius: circle.radius,
            clockwise,
            sweep,
        })
    }

    /// True when the run hugs its chord, or when it turns through a corner:
    /// a sharp turn among mostly parallel steps, or a single sharp turn
    /// between gentle ones.
    fn is_straight_or_cornered(&self, run: &[Point]) -> bool {
        let start = run[0];
        let end = run[run.len() - 1];
        let max_offset = run
            .iter()
            .map(|p| p.distance_to_chord(&start, &end))
            .fold(0.0, f64::max);
        if max_offset <= self.config.tolerance {
            return true;
        }

        let directions: Vec<(f64, f64)> = run
            .windows(2)
            .filter_map(|w| {
                let dx = w[1].x - w[0].x;
                let dy = w[1].y - w[0].y;
                let len = dx.hypot(dy);
                (len > f64::EPSILON).then(|| (dx / len, dy / len))
            })
            .collect();
        if directions.len() < 2 {
            return true;
        }

        let turns: Vec<f64> = directions
            .windows(2)
            .map(|d| {
                let cross = d[0].0 * d[1].1 - d[0].1 * d[1].0;
                let dot = d[0].0 * d[1].0 + d[0].1 * d[1].1;
                cross.atan2(dot).abs()
            })
            .collect();
        let corner_limit = self.config.corner_degrees.to_radians();
        if !turns.iter().any(|t| *t >= corner_limit) {
            return false;
        }
        let parallel_limit = self.config.parallel_degrees.to_radians();
        let parallel = turns.iter().filter(|t| **t < parallel_limit).count();
        let gentle = turns.iter().filter(|t| **t < corner_limit / 3.0).count();
        parallel * 2 >= turns.len() || gentle + 1 == turns.len()
    }
}

/// Normalizes an angle into (-pi, pi].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_arc(count: usize, counter_clockwise: bool) -> Vec<Point> {
        (0..count)
            .map(|i| {
                let t = (PI / 2.0) * i as f64 / (count - 1) as f64;
                let t = if counter_clockwise { t } else { -t };
                Point::new(10.0 * t.cos(), 10.0 * t.sin())
            })
            .collect()
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_arc_is_one_arc() {
        let segmenter = ArcSegmenter::default();
        let segments = segmenter.segment(&quarter_arc(8, true));
        assert_eq!(segments.len(), 1);
        let PathSegment::Arc(arc) = &segments[0] else {
            panic!("expected an arc, got {:?}", segments[0]);
        };
        assert!((arc.radius - 10.0).abs() < 1e-6);
        assert!(!arc.clockwise);
        assert!((arc.sweep - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_sampling_is_clockwise() {
        let segmenter = ArcSegmenter::default();
        let segments = segmenter.segment(&quarter_arc(8, false));
        assert_eq!(segments.len(), 1);
        match &segments[0] {
            PathSegment::Arc(arc) => {
                assert!(arc.clockwise);
                assert!(arc.sweep < 0.0);
            }
            other => panic!("expected an arc, got {:?}", other),
        }
    }

    #[test]
    fn test_corner_is_not_an_arc() {
        let mut pts: Vec<Point> = (0..4).map(|i| Point::new(10.0, i as f64 * 10.0 / 3.0)).collect();
        pts.extend((1..5).map(|i| Point::new(10.0 - i as f64 * 2.5, 10.0)));
        let segments = ArcSegmenter::default().segment(&pts);
        assert!(segments.iter().all(|s| s.is_line()));
        assert_eq!(segments.len(), 1);
        let PathSegment::Line(run) = &segments[0] else {
            unreachable!()
        };
        assert_eq!(run, &pts);
    }

    #[test]
    fn test_square_shoulders_are_not_an_arc() {
        // Corners of the square lie on one circle; the edges do not.
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, -10.0),
            Point::new(10.0, -10.0),
            Point::new(10.0, 0.0),
            Point::new(15.0, 0.0),
        ];
        let segments = ArcSegmenter::default().segment(&pts);
        assert_eq!(segments, vec![PathSegment::Line(pts)]);
    }

    #[test]
    fn test_single_sharp_turn_between_gentle_ones_is_cornered() {
        let segmenter = ArcSegmenter::default();
        let run = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.2),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(10.2, 10.0),
        ];
        assert!(segmenter.is_straight_or_cornered(&run));
        assert!(!segmenter.is_straight_or_cornered(&quarter_arc(8, true)));
    }

    #[test]
    fn test_short_stroke_is_single_line() {
        let pts = quarter_arc(4, true);
        let segments = ArcSegmenter::default().segment(&pts);
        assert_eq!(segments, vec![PathSegment::Line(pts)]);
    }

    #[test]
    fn test_straight_stroke_is_single_line() {
        let pts: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.5 * i as f64)).collect();
        let segments = ArcSegmenter::default().segment(&pts);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_line());
        assert_eq!(segments[0].end(), Some(pts[9]));
    }

    #[test]
    fn test_radius_out_of_range_is_rejected() {
        let pts: Vec<Point> = (0..8)
            .map(|i| {
                let t = (PI / 2.0) * i as f64 / 7.0;
                Point::new(100.0 * t.cos(), 100.0 * t.sin())
            })
            .collect();
        let segments = ArcSegmenter::default().segment(&pts);
        assert!(segments.iter().all(|s| s.is_line()));
    }

    #[test]
    fn test_line_then_arc() {
        let mut pts: Vec<Point> = (0..3).map(|i| Point::new(10.0, -12.0 + i as f64 * 4.0)).collect();
        pts.extend(quarter_arc(8, true));
        let segments = ArcSegmenter::default().segment(&pts);
        assert!(segments.iter().any(|s| s.is_arc()));
        assert_eq!(segments.first().and_then(|s| s.start()), Some(pts[0]));
        assert_eq!(segments.last().and_then(|s| s.end()), Some(pts[pts.len() - 1]));
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }
}
