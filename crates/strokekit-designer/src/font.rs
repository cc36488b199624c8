//! Glyph store: per-character strokes, metrics and kerning rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strokekit_core::{BoundingBox, GlyphError, Point};

use crate::kerning::{kern_value, KernRule};

/// A single pen stroke in design units.
pub type Stroke = Vec<Point>;

fn default_family() -> String {
    "StrokeKit".to_string()
}

/// Font-wide vertical metrics in design units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascent: f64,
    pub descent: f64,
    pub cap_height: f64,
    pub x_height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascent: 800.0,
            descent: -200.0,
            cap_height: 700.0,
            x_height: 500.0,
        }
    }
}

impl FontMetrics {
    /// Checks the baseline ordering `ascent > 0 > descent` and a positive em size.
    pub fn validate(&self) -> Result<(), GlyphError> {
        let values = [
            self.units_per_em,
            self.ascent,
            self.descent,
            self.cap_height,
            self.x_height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GlyphError::InvalidMetrics {
                reason: "metrics must be finite".to_string(),
            });
        }
        if self.units_per_em <= 0.0 {
            return Err(GlyphError::InvalidMetrics {
                reason: format!("units per em must be positive, got {}", self.units_per_em),
            });
        }
        if self.ascent <= 0.0 || self.descent >= 0.0 {
            return Err(GlyphError::InvalidMetrics {
                reason: format!(
                    "expected ascent > 0 > descent, got ascent {} and descent {}",
                    self.ascent, self.descent
                ),
            });
        }
        Ok(())
    }
}

/// One character's drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub strokes: Vec<Stroke>,
    /// Derived from `strokes`; rebuilt on every change.
    #[serde(default)]
    pub bounds: BoundingBox,
    pub advance_width: f64,
}

impl Glyph {
    /// An empty glyph with the given advance.
    pub fn new(advance_width: f64) -> Self {
        Self {
            strokes: Vec::new(),
            bounds: BoundingBox::default(),
            advance_width,
        }
    }

    pub fn with_strokes(strokes: Vec<Stroke>, advance_width: f64) -> Self {
        let mut glyph = Self {
            strokes,
            bounds: BoundingBox::default(),
            advance_width,
        };
        glyph.recompute_bounds();
        glyph
    }

    pub fn recompute_bounds(&mut self) {
        self.bounds = BoundingBox::from_points(self.strokes.iter().flatten()).unwrap_or_default();
    }

    /// True when the glyph carries no ink.
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Vec::len).sum()
    }

    /// Advance used for layout: the explicit width, else the ink width.
    pub fn effective_advance(&self) -> f64 {
        if self.advance_width.is_finite() && self.advance_width > 0.0 {
            self.advance_width
        } else {
            self.bounds.width
        }
    }
}

/// Maps typographic punctuation to the ASCII form used for glyph lookup.
pub fn normalize(ch: char) -> Option<&'static str> {
    match ch {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => Some("'"),
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => Some("\""),
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => Some("-"),
        '\u{2026}' => Some("..."),
        '\u{00A0}' => Some(" "),
        _ => None,
    }
}

/// A stroke font: glyphs keyed by character, metrics and ordered kerning rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default)]
    pub metrics: FontMetrics,
    #[serde(default)]
    glyphs: BTreeMap<char, Glyph>,
    #[serde(default)]
    kerning: Vec<KernRule>,
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontMetrics::default())
    }
}

impl Font {
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            family: default_family(),
            metrics,
            glyphs: BTreeMap::new(),
            kerning: Vec::new(),
        }
    }

    pub fn glyphs(&self) -> &BTreeMap<char, Glyph> {
        &self.glyphs
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn kern_rules(&self) -> &[KernRule] {
        &self.kerning
    }

    /// True when no glyph carries any ink.
    pub fn is_empty(&self) -> bool {
        self.glyphs.values().all(Glyph::is_empty)
    }

    /// Creates an empty glyph for `ch` if none exists yet.
    pub fn ensure_glyph(&mut self, ch: char, default_advance: f64) -> &mut Glyph {
        self.glyphs.entry(ch).or_insert_with(|| Glyph::new(default_advance))
    }

    /// Replaces the strokes of `ch`, keeping any advance already set.
    pub fn set_strokes(&mut self, ch: char, strokes: Vec<Stroke>, default_advance: f64) {
        let glyph = self.ensure_glyph(ch, default_advance);
        glyph.strokes = strokes;
        glyph.recompute_bounds();
    }

    /// Appends one stroke to `ch`.
    pub fn add_stroke(
        &mut self,
        ch: char,
        stroke: Stroke,
        default_advance: f64,
    ) -> Result<(), GlyphError> {
        if stroke.is_empty() {
            return Err(GlyphError::EmptyStroke { character: ch });
        }
        let glyph = self.ensure_glyph(ch, default_advance);
        glyph.strokes.push(stroke);
        glyph.recompute_bounds();
        Ok(())
    }

    /// Removes every stroke of `ch` but keeps the glyph and its advance.
    pub fn clear_glyph(&mut self, ch: char) -> Result<(), GlyphError> {
        let glyph = self
            .glyphs
            .get_mut(&ch)
            .ok_or(GlyphError::GlyphNotFound { character: ch })?;
        glyph.strokes.clear();
        glyph.recompute_bounds();
        Ok(())
    }

    pub fn remove_glyph(&mut self, ch: char) -> Option<Glyph> {
        self.glyphs.remove(&ch)
    }

    /// Restores a glyph snapshot; `None` removes the entry.
    pub(crate) fn restore_glyph(&mut self, ch: char, glyph: Option<Glyph>) {
        match glyph {
            Some(glyph) => {
                self.glyphs.insert(ch, glyph);
            }
            None => {
                self.glyphs.remove(&ch);
            }
        }
    }

    /// Sets the advance of an existing glyph.
    pub fn set_advance(&mut self, ch: char, width: f64) -> Result<(), GlyphError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(GlyphError::InvalidAdvance {
                character: ch,
                width,
            });
        }
        let glyph = self
            .glyphs
            .get_mut(&ch)
            .ok_or(GlyphError::GlyphNotFound { character: ch })?;
        glyph.advance_width = width;
        Ok(())
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) -> Result<(), GlyphError> {
        metrics.validate()?;
        self.metrics = metrics;
        Ok(())
    }

    /// Appends a kerning rule; rejected rules are never stored.
    pub fn add_kern_rule(&mut self, left: &str, right: &str, adjustment: f64) -> Result<(), GlyphError> {
        let rule = KernRule::new(left, right, adjustment)?;
        self.kerning.push(rule);
        Ok(())
    }

    /// Like [`Font::add_kern_rule`] with the adjustment given as text.
    pub fn add_kern_rule_str(&mut self, left: &str, right: &str, adjustment: &str) -> Result<(), GlyphError> {
        let rule = KernRule::parse(left, right, adjustment)?;
        self.kerning.push(rule);
        Ok(())
    }

    pub fn remove_kern_rule(&mut self, index: usize) -> Result<KernRule, GlyphError> {
        if index >= self.kerning.len() {
            return Err(GlyphError::KernRuleNotFound {
                index,
                len: self.kerning.len(),
            });
        }
        Ok(self.kerning.remove(index))
    }

    /// Total kerning adjustment for the pair, in design units.
    pub fn kern(&self, left: char, right: char) -> f64 {
        kern_value(&self.kerning, left, right)
    }

    /// Glyph used to render `ch`: the exact key, else its normalized form.
    pub fn glyph_for(&self, ch: char) -> Option<&Glyph> {
        if let Some(glyph) = self.glyphs.get(&ch) {
            return Some(glyph);
        }
        let normalized = normalize(ch)?;
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(single), None) => self.glyphs.get(&single),
            _ => None,
        }
    }

    /// Expands punctuation the font cannot draw into its ASCII form.
    pub fn resolve_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            if self.glyphs.contains_key(&ch) {
                out.push(ch);
                continue;
            }
            match normalize(ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out
    }

    /// Decodes a font, validating metrics and advances and rebuilding bounds.
    pub fn from_json(json: &str) -> Result<Self, GlyphError> {
        let mut font: Font = serde_json::from_str(json).map_err(|e| GlyphError::Serialization {
            reason: e.to_string(),
        })?;
        font.metrics.validate()?;
        for (ch, glyph) in font.glyphs.iter_mut() {
            if !glyph.advance_width.is_finite() || glyph.advance_width <= 0.0 {
                return Err(GlyphError::InvalidAdvance {
                    character: *ch,
                    width: glyph.advance_width,
                });
            }
            glyph.recompute_bounds();
        }
        Ok(font)
    }

    pub fn to_json(&self) -> Result<String, GlyphError> {
        serde_json::to_string_pretty(self).map_err(|e| GlyphError::Serialization {
            reason: e.to_string(),
        })
    }
}
