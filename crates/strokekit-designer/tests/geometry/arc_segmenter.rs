use std::f64::consts::PI;

use strokekit_designer::{simplify_stroke, ArcSegmenter, ArcSegmenterConfig, PathSegment, Point};

fn quarter_arc(reverse: bool) -> Vec<Point> {
    let mut pts: Vec<Point> = (0..8)
        .map(|i| {
            let t = (PI / 2.0) * i as f64 / 7.0;
            Point::new(10.0 * t.cos(), 10.0 * t.sin())
        })
        .collect();
    if reverse {
        pts.reverse();
    }
    pts
}

#[test]
fn test_quarter_arc_winding_follows_sampling() {
    let segmenter = ArcSegmenter::default();
    for reverse in [false, true] {
        let segments = segmenter.segment(&quarter_arc(reverse));
        assert_eq!(segments.len(), 1);
        let PathSegment::Arc(arc) = &segments[0] else {
            panic!("expected an arc");
        };
        assert!((arc.radius - 10.0).abs() < 1e-6);
        assert!(arc.center.distance_to(&Point::new(0.0, 0.0)) < 1e-6);
        // Counter-clockwise in a y-up frame when sampled forward.
        assert_eq!(arc.clockwise, reverse);
    }
}

#[test]
fn test_corner_with_same_endpoints_is_not_an_arc() {
    // Same start and end as the quarter arc, bent through (10, 10).
    let mut pts: Vec<Point> = (0..4).map(|i| Point::new(10.0, i as f64 * 10.0 / 3.0)).collect();
    pts.extend((1..5).map(|i| Point::new(10.0 - i as f64 * 2.5, 10.0)));
    let segments = ArcSegmenter::default().segment(&pts);
    assert!(!segments.iter().any(PathSegment::is_arc));
}

#[test]
fn test_tight_tolerance_rejects_noisy_arc() {
    let mut pts = quarter_arc(false);
    for (i, p) in pts.iter_mut().enumerate() {
        let wobble = if i % 2 == 0 { 0.3 } else { -0.3 };
        p.x += wobble;
        p.y += wobble;
    }
    let loose = ArcSegmenter::new(ArcSegmenterConfig::with_tolerance(1.0));
    assert!(loose.segment(&pts).iter().any(PathSegment::is_arc));

    let strict = ArcSegmenter::new(ArcSegmenterConfig::with_tolerance(0.01));
    assert!(strict.segment(&pts).iter().all(PathSegment::is_line));
}

#[test]
fn test_segments_cover_every_point_in_order() {
    let mut pts: Vec<Point> = (0..5).map(|i| Point::new(-20.0 + i as f64 * 4.0, -10.0)).collect();
    pts.extend((0..10).map(|i| {
        let t = -PI / 2.0 + PI * i as f64 / 9.0;
        Point::new(10.0 * t.cos(), 10.0 * t.sin())
    }));
    let segments = ArcSegmenter::default().segment(&pts);
    assert_eq!(segments.first().and_then(PathSegment::start), Some(pts[0]));
    assert_eq!(segments.last().and_then(PathSegment::end), pts.last().copied());
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    for segment in &segments {
        if let PathSegment::Arc(arc) = segment {
            assert!(arc.sweep.abs() >= 20f64.to_radians());
            assert!(arc.radius >= 0.5 && arc.radius <= 50.0);
        }
    }
}

fn sample_edge(from: Point, to: Point, steps: usize) -> impl Iterator<Item = Point> {
    (0..steps).map(move |i| {
        let t = i as f64 / steps as f64;
        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    })
}

#[test]
fn test_simplified_square_shoulders_stay_lines() {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(0.0, -10.0),
        Point::new(10.0, -10.0),
        Point::new(10.0, 0.0),
        Point::new(15.0, 0.0),
    ];
    let mut dense: Vec<Point> = corners
        .windows(2)
        .flat_map(|w| sample_edge(w[0], w[1], 20))
        .collect();
    dense.push(corners[4]);

    let simplified = simplify_stroke(&dense, 0.2);
    assert_eq!(simplified.len(), corners.len());

    let segments = ArcSegmenter::default().segment(&simplified);
    assert!(segments.iter().all(PathSegment::is_line), "{:?}", segments);
}
