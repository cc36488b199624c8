use strokekit_designer::dxf_export::DxfExporter;
use strokekit_designer::{
    compile_text, export_text, ExportConfig, ExportFormat, Font, GcodeEmitter, LayoutConfig,
    Point, SvgExporter, TextLayoutEngine, ToolpathCompiler, YAxis,
};

fn triangle_font() -> Font {
    let mut font = Font::default();
    font.add_stroke(
        'A',
        vec![
            Point::new(0.0, 0.0),
            Point::new(250.0, -700.0),
            Point::new(500.0, 0.0),
            Point::new(0.0, 0.0),
        ],
        500.0,
    )
    .unwrap();
    font.ensure_glyph(' ', 300.0);
    font
}

fn layout_config() -> LayoutConfig {
    LayoutConfig {
        output_size: 10.0,
        char_spacing: 0.0,
        space_width: 3.0,
        ..LayoutConfig::default()
    }
}

#[test]
fn test_two_glyphs_separated_by_one_space_advance() {
    let font = triangle_font();
    let config = layout_config();
    let layout = TextLayoutEngine::new(&font, &config).layout("A A").unwrap();
    let line = &layout.lines[0];
    assert_eq!(line.glyphs.len(), 3);
    assert!((line.glyphs[1].x - 5.0).abs() < 1e-9);
    assert!((line.glyphs[2].x - 8.0).abs() < 1e-9);
    assert!((line.glyphs[1].advance - 3.0).abs() < 1e-9);

    let compiled = ToolpathCompiler::default().compile(&font, &layout, YAxis::Down);
    assert_eq!(compiled.strokes.len(), 2);
    let first = compiled.strokes[0].start().unwrap();
    let second = compiled.strokes[1].start().unwrap();
    assert!((second.x - first.x - 8.0).abs() < 1e-9);
    assert!((second.y - first.y).abs() < 1e-9);
}

#[test]
fn test_every_format_uses_the_same_placement() {
    let font = triangle_font();
    let layout = layout_config();
    let export = ExportConfig::default();

    let down = compile_text(&font, "A A", &layout, &export, ExportFormat::Svg).unwrap();
    let up = compile_text(&font, "A A", &layout, &export, ExportFormat::Gcode).unwrap();
    assert_eq!(down.strokes.len(), up.strokes.len());
    for (a, b) in down.strokes.iter().zip(&up.strokes) {
        let (pa, pb) = (a.start().unwrap(), b.start().unwrap());
        assert!((pa.x - pb.x).abs() < 1e-9);
        assert!((pa.y - (down.height - pb.y)).abs() < 1e-9);
    }

    let svg = SvgExporter::new(&export).export(&down);
    assert!(svg.contains("M 0.000 10.000"));
    assert!(svg.contains("M 8.000 10.000"));

    let gcode = GcodeEmitter::new(&export).emit(&up).unwrap();
    assert!(gcode.contains("G00 X0.000 Y2.000"));
    assert!(gcode.contains("G00 X8.000 Y2.000"));
    assert!(gcode.contains("G01 X2.500 Y9.000"));

    let drawing = DxfExporter::new(&export).drawing(&up).unwrap();
    let starts: Vec<f64> = drawing
        .entities()
        .filter_map(|e| match &e.specific {
            dxf::entities::EntityType::LwPolyline(p) => p.vertices.first().map(|v| v.x),
            _ => None,
        })
        .collect();
    assert_eq!(starts.len(), 2);
    assert!((starts[1] - starts[0] - 8.0).abs() < 1e-9);

    let png = export_text(&font, "A A", &layout, &export, ExportFormat::Png).unwrap();
    let image = image::load_from_memory(&png).unwrap();
    // 13 mm of text plus 2 mm margins at 10 px/mm.
    assert_eq!(image.width(), 170);
}

#[test]
fn test_wrapped_lines_stack_downward() {
    let font = triangle_font();
    let config = LayoutConfig {
        max_width: 6.0,
        ..layout_config()
    };
    let layout = TextLayoutEngine::new(&font, &config).layout("A A").unwrap();
    assert_eq!(layout.lines.len(), 2);
    let compiled = ToolpathCompiler::default().compile(&font, &layout, YAxis::Down);
    let first = compiled.strokes[0].start().unwrap();
    let second = compiled.strokes[1].start().unwrap();
    assert!((second.x - first.x).abs() < 1e-9);
    assert!((second.y - first.y - 12.0).abs() < 1e-9);
}
