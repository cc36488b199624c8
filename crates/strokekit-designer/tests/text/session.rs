use strokekit_designer::{
    export_text, EditorSession, EditorSettings, ExportConfig, ExportFormat, Font, LayoutConfig,
    Point, SvgFontWriter,
};

fn draw(session: &mut EditorSession, pixels: &[(f64, f64)]) {
    let (first, rest) = pixels.split_first().unwrap();
    session.begin_stroke(Point::new(first.0, first.1)).unwrap();
    for &(x, y) in rest {
        session.extend_stroke(Point::new(x, y));
    }
    session.end_stroke().unwrap();
}

#[test]
fn test_drawn_glyph_exports() {
    let mut session = EditorSession::new(Font::default(), EditorSettings::default());
    session.select_char('L');
    let down: Vec<(f64, f64)> = (0..=30).map(|i| (40.0, 20.0 + i as f64 * 9.3)).collect();
    draw(&mut session, &down);
    draw(&mut session, &[(40.0, 300.0), (140.0, 300.0)]);

    let glyph = session.font().glyph('L').unwrap();
    assert_eq!(glyph.strokes.len(), 2);
    assert_eq!(glyph.strokes[0].len(), 2);
    assert_eq!(glyph.advance_width, 500.0);

    let gcode = export_text(
        session.font(),
        "LL",
        &LayoutConfig::default(),
        &ExportConfig::default(),
        ExportFormat::Gcode,
    )
    .unwrap();
    let text = String::from_utf8(gcode).unwrap();
    assert_eq!(text.matches("G01 Z-0.500").count(), 4);
}

#[test]
fn test_undo_restores_exportability() {
    let mut session = EditorSession::default();
    session.select_char('I');
    draw(&mut session, &[(100.0, 20.0), (100.0, 300.0)]);
    session.undo();
    let result = export_text(
        session.font(),
        "I",
        &LayoutConfig::default(),
        &ExportConfig::default(),
        ExportFormat::Svg,
    );
    assert!(result.unwrap_err().is_empty_input());

    session.redo();
    assert!(export_text(
        session.font(),
        "I",
        &LayoutConfig::default(),
        &ExportConfig::default(),
        ExportFormat::Svg,
    )
    .is_ok());
}

#[test]
fn test_session_font_as_svg_font() {
    let mut session = EditorSession::default();
    session.select_char('I');
    draw(&mut session, &[(100.0, 20.0), (100.0, 300.0)]);
    session.add_kern_rule("I", "I", "25").unwrap();
    assert!(session.add_kern_rule("I", "I", "wide").is_err());

    let svg = SvgFontWriter::new("handwriting").write(session.font());
    assert!(svg.contains(r#"glyph-name="I""#));
    assert!(svg.contains(r#"d="M250 700 L250 0""#));
    assert!(svg.contains(r#"<hkern u1="I" u2="I" k="25"/>"#));
}
