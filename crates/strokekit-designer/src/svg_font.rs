//! SVG font container export.
//!
//! Writes the font as an SVG `<font>` element: one `<glyph>` per character
//! with its path flipped into y-up font space, plus `<hkern>` pairs. Single
//! character selectors use `u1`/`u2`; list and range selectors are expanded
//! to glyph-name classes in `g1`/`g2`.

use std::fmt::Write as _;

use crate::font::{Font, Glyph};
use crate::kerning::KernSelector;
use crate::svg_export::escape_attr;

/// Glyph name used in `glyph-name` and kerning classes.
pub fn glyph_name(ch: char) -> String {
    if ch.is_ascii_alphanumeric() {
        ch.to_string()
    } else {
        format!("uni{:04X}", ch as u32)
    }
}

/// Path data for a glyph in font space (y up, baseline at 0).
pub fn glyph_path(glyph: &Glyph) -> String {
    let mut d = String::new();
    for stroke in &glyph.strokes {
        for (i, p) in stroke.iter().enumerate() {
            if !d.is_empty() {
                d.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{} {}", command, p.x, 0.0 - p.y);
        }
    }
    d
}

/// Serializes fonts to the SVG font format.
#[derive(Debug, Clone, Default)]
pub struct SvgFontWriter {
    /// Value of the `<font id>` attribute
    pub font_id: String,
}

impl SvgFontWriter {
    pub fn new(font_id: impl Into<String>) -> Self {
        Self {
            font_id: font_id.into(),
        }
    }

    pub fn write(&self, font: &Font) -> String {
        let metrics = &font.metrics;
        let default_advance = metrics.units_per_em * 0.5;
        let id = if self.font_id.is_empty() {
            "strokekit"
        } else {
            self.font_id.as_str()
        };

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\">\n<defs>\n");
        let _ = writeln!(
            svg,
            r#"<font id="{}" horiz-adv-x="{}">"#,
            escape_text(id),
            default_advance
        );
        let _ = writeln!(
            svg,
            r#"  <font-face font-family="{}" units-per-em="{}" ascent="{}" descent="{}" cap-height="{}" x-height="{}"/>"#,
            escape_text(&font.family),
            metrics.units_per_em,
            metrics.ascent,
            metrics.descent,
            metrics.cap_height,
            metrics.x_height
        );
        let _ = writeln!(svg, r#"  <missing-glyph horiz-adv-x="{}"/>"#, default_advance);

        for (&ch, glyph) in font.glyphs() {
            let d = glyph_path(glyph);
            let path_attr = if d.is_empty() {
                String::new()
            } else {
                format!(r#" d="{}""#, d)
            };
            let _ = writeln!(
                svg,
                r#"  <glyph unicode="{}" glyph-name="{}" horiz-adv-x="{}"{}/>"#,
                escape_attr(ch),
                glyph_name(ch),
                glyph.advance_width,
                path_attr
            );
        }

        for rule in font.kern_rules() {
            let (Some(first), Some(second)) = (
                selector_attr(&rule.left, '1', font),
                selector_attr(&rule.right, '2', font),
            ) else {
                continue;
            };
            let _ = writeln!(svg, r#"  <hkern {} {} k="{}"/>"#, first, second, rule.adjustment);
        }

        svg.push_str("</font>\n</defs>\n</svg>\n");
        svg
    }
}

/// `u1="A"` for single characters, `g1="A,B"` for classes. Classes that
/// select no glyph of the font yield `None`.
fn selector_attr(selector: &KernSelector, side: char, font: &Font) -> Option<String> {
    match selector {
        KernSelector::Char(c) => Some(format!(r#"u{}="{}""#, side, escape_attr(*c))),
        _ => {
            let names: Vec<String> = selector
                .members(font.glyphs().keys().copied())
                .into_iter()
                .map(glyph_name)
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(format!(r#"g{}="{}""#, side, names.join(",")))
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.chars().map(escape_attr).collect()
}
