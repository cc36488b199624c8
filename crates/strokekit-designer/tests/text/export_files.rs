use strokekit_core::{Error, ExportError};
use strokekit_designer::{export_to_path, ExportConfig, ExportFormat, Font, LayoutConfig, Point};
use tempfile::tempdir;

fn font() -> Font {
    let mut font = Font::default();
    font.add_stroke('H', vec![Point::new(0.0, 0.0), Point::new(0.0, -700.0)], 600.0)
        .unwrap();
    font.add_stroke('H', vec![Point::new(500.0, 0.0), Point::new(500.0, -700.0)], 600.0)
        .unwrap();
    font.add_stroke('H', vec![Point::new(0.0, -350.0), Point::new(500.0, -350.0)], 600.0)
        .unwrap();
    font
}

#[test]
fn test_writes_every_format() {
    let dir = tempdir().unwrap();
    for format in [ExportFormat::Gcode, ExportFormat::Svg, ExportFormat::Dxf, ExportFormat::Png] {
        let path = dir.path().join(format!("hello.{}", format.extension()));
        export_to_path(
            &font(),
            "HH\nH",
            &LayoutConfig::default(),
            &ExportConfig::default(),
            format,
            &path,
        )
        .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty(), "{} output is empty", format);
        assert_eq!(ExportFormat::from_path(&path), Some(format));
    }
}

#[test]
fn test_failed_export_creates_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.gcode");
    let err = export_to_path(
        &font(),
        "",
        &LayoutConfig::default(),
        &ExportConfig::default(),
        ExportFormat::Gcode,
        &path,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Export(ExportError::EmptyText)));
    assert!(!path.exists());

    let err = export_to_path(
        &Font::default(),
        "H",
        &LayoutConfig::default(),
        &ExportConfig::default(),
        ExportFormat::Svg,
        &path,
    )
    .unwrap_err();
    assert!(err.is_empty_input());
    assert!(!path.exists());
}

#[test]
fn test_font_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("font.json");
    let original = font();
    std::fs::write(&path, original.to_json().unwrap()).unwrap();
    let loaded = Font::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, original);
}
