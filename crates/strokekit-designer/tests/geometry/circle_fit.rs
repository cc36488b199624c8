use std::f64::consts::PI;

use strokekit_designer::{fit_circle, Point};

fn sample(cx: f64, cy: f64, r: f64, from: f64, sweep: f64, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = from + sweep * i as f64 / (count - 1) as f64;
            Point::new(cx + r * t.cos(), cy + r * t.sin())
        })
        .collect()
}

#[test]
fn test_recovers_circles_of_many_sizes() {
    for &(cx, cy, r) in &[(0.0, 0.0, 1.0), (12.5, -3.0, 7.0), (-40.0, 25.0, 45.0)] {
        let pts = sample(cx, cy, r, 0.4, PI * 0.75, 12);
        let circle = fit_circle(&pts).expect("fit");
        assert!((circle.radius - r).abs() < 1e-6 * r.max(1.0), "radius {}", circle.radius);
        assert!(circle.center.distance_to(&Point::new(cx, cy)) < 1e-6 * r.max(1.0));
    }
}

#[test]
fn test_three_points_define_a_circle() {
    let pts = [Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0)];
    let circle = fit_circle(&pts).unwrap();
    assert!(circle.center.distance_to(&Point::new(0.0, 0.0)) < 1e-9);
    assert!((circle.radius - 1.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_input_has_no_fit() {
    let line: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 3.0)).collect();
    assert!(fit_circle(&line).is_none());
    let same = vec![Point::new(2.0, 2.0); 5];
    assert!(fit_circle(&same).is_none());
}
