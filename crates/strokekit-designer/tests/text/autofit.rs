use strokekit_designer::{Font, LayoutConfig, Point, TextLayoutEngine};

/// Every letter is one em wide, so a line of n letters is n x size wide.
fn monospace_font() -> Font {
    let mut font = Font::default();
    for ch in ['A', 'B', 'C', 'D'] {
        font.add_stroke(ch, vec![Point::new(0.0, 0.0), Point::new(800.0, -700.0)], 1000.0)
            .unwrap();
    }
    font.add_stroke(' ', vec![Point::new(0.0, 0.0)], 1000.0).unwrap();
    font
}

fn autofit_config(max_width: f64, max_height: f64, max_text_size: f64) -> LayoutConfig {
    LayoutConfig {
        output_size: 10.0,
        line_gap: 0.0,
        max_width,
        max_height,
        auto_fit: true,
        max_text_size,
        ..LayoutConfig::default()
    }
}

#[test]
fn test_largest_size_within_width() {
    let font = monospace_font();
    // Four letters: 40 wide at size 10, width grows 4 per unit size.
    let config = autofit_config(100.0, 0.0, 200.0);
    let engine = TextLayoutEngine::new(&font, &config);
    let size = engine.fit_size("ABCD").unwrap();
    assert_eq!(size, 25.0);
    assert!(engine.measure_line("ABCD", size) <= 100.0 + 1e-9);
    assert!(engine.measure_line("ABCD", size + 0.5) > 100.0);
}

#[test]
fn test_search_is_idempotent() {
    let font = monospace_font();
    let config = autofit_config(100.0, 60.0, 200.0);
    let engine = TextLayoutEngine::new(&font, &config);
    let first = engine.layout("AB CD\nABCD").unwrap();
    for _ in 0..5 {
        assert_eq!(engine.layout("AB CD\nABCD").unwrap(), first);
    }
}

#[test]
fn test_wrapping_interacts_with_height_bound() {
    let font = monospace_font();
    // "AB CD" fits on one line up to size 20 (5 letters), then wraps into two
    // lines, so width allows growth to 50 but height caps it.
    let config = autofit_config(100.0, 60.0, 200.0);
    let engine = TextLayoutEngine::new(&font, &config);
    let layout = engine.layout("AB CD").unwrap();
    assert!(layout.width <= 100.0 + 1e-9);
    assert!(layout.height <= 60.0 + 1e-9);
    assert_eq!(layout.output_size, 30.0);
    assert_eq!(layout.lines.len(), 2);
}

#[test]
fn test_disabled_without_bounds() {
    let font = monospace_font();
    let config = autofit_config(0.0, 0.0, 200.0);
    let layout = TextLayoutEngine::new(&font, &config).layout("ABCD").unwrap();
    assert_eq!(layout.output_size, 10.0);
}

#[test]
fn test_size_stays_on_half_unit_grid() {
    let font = monospace_font();
    let config = LayoutConfig {
        output_size: 7.25,
        ..autofit_config(33.0, 0.0, 200.0)
    };
    let size = TextLayoutEngine::new(&font, &config).fit_size("ABC").unwrap();
    // 3 x size <= 33 gives 11; the grid from 7.25 tops out at 10.75.
    assert_eq!(size, 10.75);
}
