use strokekit_designer::{Font, KernSelector, LayoutConfig, TextLayoutEngine};

#[test]
fn test_range_selector_matches_letters_only() {
    let selector = KernSelector::parse("A-Z").unwrap();
    assert!(selector.matches('B'));
    assert!(!selector.matches('1'));
}

#[test]
fn test_list_selector_matches_members_only() {
    let selector = KernSelector::parse("A,V,W").unwrap();
    assert!(selector.matches('V'));
    assert!(!selector.matches('B'));
}

#[test]
fn test_matching_rules_are_summed() {
    let mut font = Font::default();
    font.add_kern_rule_str("A", "V", "60").unwrap();
    font.add_kern_rule_str("A-Z", "A,V,W", "15").unwrap();
    font.add_kern_rule_str("T", "o", "80").unwrap();
    assert_eq!(font.kern('A', 'V'), 75.0);
    assert_eq!(font.kern('B', 'W'), 15.0);
    assert_eq!(font.kern('V', 'A'), 15.0);
    assert_eq!(font.kern('T', 'a'), 0.0);
}

#[test]
fn test_rejected_rules_leave_font_untouched() {
    let mut font = Font::default();
    font.add_kern_rule_str("A", "V", "10").unwrap();
    for (left, right, value) in [("", "V", "10"), ("A", " ", "10"), ("A", "V", "ten"), ("Z-A", "V", "1")] {
        assert!(font.add_kern_rule_str(left, right, value).is_err());
    }
    assert_eq!(font.kern_rules().len(), 1);
}

#[test]
fn test_negative_kerning_loosens_layout() {
    let mut font = Font::default();
    for ch in ['L', 'T'] {
        font.ensure_glyph(ch, 500.0);
    }
    font.add_kern_rule("L", "T", -100.0).unwrap();
    let config = LayoutConfig::default();
    let engine = TextLayoutEngine::new(&font, &config);
    assert!((engine.measure_line("LT", 10.0) - 11.0).abs() < 1e-9);
}
