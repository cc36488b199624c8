//! Editor session: selected character, in-progress stroke and edit history.
//!
//! Pointer input arrives in reference-canvas pixels and is converted to
//! design units on entry. A stroke grows while the gesture continues and is
//! replaced by its simplified form when the gesture ends.

use serde::{Deserialize, Serialize};
use strokekit_core::{GlyphError, Point};
use tracing::debug;

use crate::font::{Font, FontMetrics, Glyph, Stroke};
use crate::history::{EditHistory, GlyphEdit};
use crate::simplify::simplify_stroke;

/// The fixed drawing surface pointer input is captured on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceCanvas {
    pub width_px: f64,
    pub height_px: f64,
    /// Distance of the baseline from the top edge
    pub baseline_px: f64,
    pub units_per_pixel: f64,
}

impl Default for ReferenceCanvas {
    fn default() -> Self {
        Self {
            width_px: 400.0,
            height_px: 400.0,
            baseline_px: 300.0,
            units_per_pixel: 2.5,
        }
    }
}

impl ReferenceCanvas {
    /// Converts a canvas pixel position into design units.
    pub fn to_design(&self, px: Point) -> Point {
        Point::new(
            px.x * self.units_per_pixel,
            (px.y - self.baseline_px) * self.units_per_pixel,
        )
    }

    /// Converts a design-space position back to canvas pixels.
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x / self.units_per_pixel,
            p.y / self.units_per_pixel + self.baseline_px,
        )
    }

    /// Advance given to freshly created glyphs: half the canvas width.
    pub fn default_advance(&self) -> f64 {
        self.width_px * 0.5 * self.units_per_pixel
    }
}

/// Editing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Douglas-Peucker tolerance in design units
    pub simplify_tolerance: f64,
    pub history_depth: usize,
    pub canvas: ReferenceCanvas,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            simplify_tolerance: 2.0,
            history_depth: 100,
            canvas: ReferenceCanvas::default(),
        }
    }
}

/// Owns the font being edited and all transient editing state.
#[derive(Debug, Clone)]
pub struct EditorSession {
    font: Font,
    settings: EditorSettings,
    selected: Option<char>,
    active_stroke: Option<Stroke>,
    history: EditHistory,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Font::default(), EditorSettings::default())
    }
}

impl EditorSession {
    pub fn new(font: Font, settings: EditorSettings) -> Self {
        let history = EditHistory::with_depth(settings.history_depth);
        Self {
            font,
            settings,
            selected: None,
            active_stroke: None,
            history,
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn into_font(self) -> Font {
        self.font
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn selected(&self) -> Option<char> {
        self.selected
    }

    pub fn active_stroke(&self) -> Option<&[Point]> {
        self.active_stroke.as_deref()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Selects `ch`, creating its glyph with the default advance on first use.
    /// Any stroke still in progress is discarded.
    pub fn select_char(&mut self, ch: char) {
        self.active_stroke = None;
        let advance = self.settings.canvas.default_advance();
        self.font.ensure_glyph(ch, advance);
        self.selected = Some(ch);
    }

    /// Starts a stroke at a canvas pixel position.
    pub fn begin_stroke(&mut self, px: Point) -> Result<(), GlyphError> {
        if self.selected.is_none() {
            return Err(GlyphError::NoActiveGlyph);
        }
        self.active_stroke = Some(vec![self.settings.canvas.to_design(px)]);
        Ok(())
    }

    /// Appends a pointer sample. Returns false when no stroke is in progress.
    pub fn extend_stroke(&mut self, px: Point) -> bool {
        let point = self.settings.canvas.to_design(px);
        match self.active_stroke.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    pub fn cancel_stroke(&mut self) {
        self.active_stroke = None;
    }

    /// Finishes the gesture: simplifies the stroke and appends it to the
    /// selected glyph. Returns the number of points kept.
    pub fn end_stroke(&mut self) -> Result<Option<usize>, GlyphError> {
        let Some(raw) = self.active_stroke.take() else {
            return Ok(None);
        };
        let ch = self.selected.ok_or(GlyphError::NoActiveGlyph)?;
        let simplified = simplify_stroke(&raw, self.settings.simplify_tolerance);
        let kept = simplified.len();

        let before = self.font.glyph(ch).cloned();
        self.font
            .add_stroke(ch, simplified, self.settings.canvas.default_advance())?;
        self.record(ch, before);

        debug!(character = %ch, raw = raw.len(), kept, "stroke committed");
        Ok(Some(kept))
    }

    /// Removes all strokes of the selected glyph.
    pub fn clear_selected(&mut self) -> Result<(), GlyphError> {
        let ch = self.selected.ok_or(GlyphError::NoActiveGlyph)?;
        let before = self.font.glyph(ch).cloned();
        self.font.clear_glyph(ch)?;
        self.record(ch, before);
        Ok(())
    }

    /// Sets the advance of the selected glyph.
    pub fn set_advance(&mut self, width: f64) -> Result<(), GlyphError> {
        let ch = self.selected.ok_or(GlyphError::NoActiveGlyph)?;
        let before = self.font.glyph(ch).cloned();
        self.font.set_advance(ch, width)?;
        self.record(ch, before);
        Ok(())
    }

    /// Replaces the strokes of the selected glyph.
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) -> Result<(), GlyphError> {
        let ch = self.selected.ok_or(GlyphError::NoActiveGlyph)?;
        let before = self.font.glyph(ch).cloned();
        self.font
            .set_strokes(ch, strokes, self.settings.canvas.default_advance());
        self.record(ch, before);
        Ok(())
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) -> Result<(), GlyphError> {
        self.font.set_metrics(metrics)
    }

    pub fn add_kern_rule(&mut self, left: &str, right: &str, adjustment: &str) -> Result<(), GlyphError> {
        self.font.add_kern_rule_str(left, right, adjustment)
    }

    pub fn remove_kern_rule(&mut self, index: usize) -> Result<(), GlyphError> {
        self.font.remove_kern_rule(index).map(|_| ())
    }

    /// Reverts the last glyph edit. Returns the affected character.
    pub fn undo(&mut self) -> Option<char> {
        let edit = self.history.undo()?;
        Some(self.apply(edit))
    }

    /// Re-applies the last undone edit. Returns the affected character.
    pub fn redo(&mut self) -> Option<char> {
        let edit = self.history.redo()?;
        Some(self.apply(edit))
    }

    fn apply(&mut self, edit: GlyphEdit) -> char {
        self.active_stroke = None;
        self.font.restore_glyph(edit.character, edit.after);
        edit.character
    }

    fn record(&mut self, ch: char, before: Option<Glyph>) {
        let after = self.font.glyph(ch).cloned();
        self.history.record(GlyphEdit::new(ch, before, after));
    }
}
