use proptest::prelude::*;
use strokekit_designer::{simplify_stroke, Point};

fn arbitrary_stroke() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..80)
        .prop_map(|coords| coords.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

/// Points on a strictly convex curve: no three are collinear.
fn convex_stroke() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(0.5f64..10.0, 2..60).prop_map(|steps| {
        let mut x = 0.0;
        let mut points = vec![Point::new(0.0, 0.0)];
        for step in steps {
            x += step;
            points.push(Point::new(x, x * x / 50.0));
        }
        points
    })
}

proptest! {
    #[test]
    fn zero_tolerance_is_identity(stroke in convex_stroke()) {
        prop_assert_eq!(simplify_stroke(&stroke, 0.0), stroke);
    }

    #[test]
    fn output_never_grows(stroke in arbitrary_stroke(), tolerance in 0.0f64..50.0) {
        let simplified = simplify_stroke(&stroke, tolerance);
        prop_assert!(simplified.len() <= stroke.len());
        if stroke.len() >= 2 {
            prop_assert_eq!(simplified.first(), stroke.first());
            prop_assert_eq!(simplified.last(), stroke.last());
        }
    }

    #[test]
    fn larger_tolerance_keeps_fewer_points(
        stroke in arbitrary_stroke(),
        a in 0.0f64..40.0,
        b in 0.0f64..40.0,
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let fine = simplify_stroke(&stroke, small);
        let coarse = simplify_stroke(&stroke, large);
        prop_assert!(coarse.len() <= fine.len());
        for p in &coarse {
            prop_assert!(fine.contains(p));
        }
    }

    #[test]
    fn kept_points_are_an_ordered_subsequence(stroke in arbitrary_stroke(), tolerance in 0.0f64..50.0) {
        let simplified = simplify_stroke(&stroke, tolerance);
        let mut cursor = stroke.iter();
        for p in &simplified {
            prop_assert!(cursor.any(|q| q == p));
        }
    }
}

#[test]
fn test_short_strokes_pass_through() {
    let single = vec![Point::new(4.0, 2.0)];
    assert_eq!(simplify_stroke(&single, 5.0), single);
    let pair = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
    assert_eq!(simplify_stroke(&pair, 5.0), pair);
}

#[test]
fn test_pointer_jitter_collapses() {
    let noisy: Vec<Point> = (0..50)
        .map(|i| Point::new(i as f64 * 2.0, if i % 3 == 0 { 0.4 } else { -0.3 }))
        .collect();
    let simplified = simplify_stroke(&noisy, 1.0);
    assert_eq!(simplified.len(), 2);
}
