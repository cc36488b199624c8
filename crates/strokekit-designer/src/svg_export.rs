//! SVG drawing export.
//!
//! One `<path>` per stroke using absolute move/line commands. The document
//! is sized in millimetres with a matching `viewBox`, so one user unit is
//! one millimetre.

use std::fmt::Write as _;

use strokekit_core::Point;

use crate::arc_expander::ArcExpander;
use crate::export::ExportConfig;
use crate::toolpath::CompiledText;

/// Writes compiled text as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    stroke_width: f64,
    margin: f64,
    expander: ArcExpander,
}

impl SvgExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            stroke_width: config.stroke_width,
            margin: config.margin,
            expander: ArcExpander::default(),
        }
    }

    /// Path data for one polyline.
    pub fn path_data(points: &[Point]) -> String {
        let mut d = String::new();
        for (i, p) in points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{} {:.3} {:.3}", if i == 0 { "" } else { " " }, command, p.x, p.y);
        }
        // A lone point still needs a drawable segment for round caps.
        if let [only] = points {
            let _ = write!(d, " L {:.3} {:.3}", only.x, only.y);
        }
        d
    }

    pub fn export(&self, text: &CompiledText) -> String {
        let width = text.width + 2.0 * self.margin;
        let height = text.height + 2.0 * self.margin;

        let mut svg = String::new();
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg width="{:.2}mm" height="{:.2}mm" viewBox="{:.2} {:.2} {:.2} {:.2}" xmlns="http://www.w3.org/2000/svg">"#,
            width, height, -self.margin, -self.margin, width, height
        );
        let _ = writeln!(
            svg,
            r#"  <g fill="none" stroke="black" stroke-width="{:.3}" stroke-linecap="round" stroke-linejoin="round">"#,
            self.stroke_width
        );
        for stroke in &text.strokes {
            let points = stroke.polyline(&self.expander);
            if points.is_empty() {
                continue;
            }
            let _ = writeln!(
                svg,
                r#"    <path data-char="{}" d="{}"/>"#,
                escape_attr(stroke.character),
                Self::path_data(&points)
            );
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

/// Escapes a character for use inside a double-quoted XML attribute.
pub(crate) fn escape_attr(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&apos;".to_string(),
        c if c.is_control() => format!("&#x{:X};", c as u32),
        c => c.to_string(),
    }
}
