//! Text layout: word wrap, kerning, line placement and auto-fit sizing.
//!
//! All measurements are in output units (millimetres). Design units are
//! converted with `scale = output_size / units_per_em`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strokekit_core::LayoutError;
use tracing::{debug, warn};

use crate::font::Font;

/// Size increment of the auto-fit search.
pub const AUTOFIT_STEP: f64 = 0.5;

/// Blank lines advance by this fraction of the output size.
pub const BLANK_LINE_FACTOR: f64 = 0.5;

/// Advance of an undefined character, as a fraction of the output size.
pub const UNDEFINED_ADVANCE_FACTOR: f64 = 0.5;

const FIT_EPSILON: f64 = 1e-9;

/// Text formatting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Target glyph size; one em maps to this many output units
    pub output_size: f64,
    /// Extra gap after every character
    pub char_spacing: f64,
    /// Advance of a space when the font has no space glyph
    pub space_width: f64,
    /// Extra vertical gap after non-blank lines
    pub line_gap: f64,
    /// Wrap width; 0 disables
    pub max_width: f64,
    /// Height bound for auto-fit; 0 disables
    pub max_height: f64,
    pub auto_fit: bool,
    /// Upper bound of the auto-fit search
    pub max_text_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output_size: 10.0,
            char_spacing: 0.0,
            space_width: 3.0,
            line_gap: 2.0,
            max_width: 0.0,
            max_height: 0.0,
            auto_fit: false,
            max_text_size: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.output_size.is_finite() || self.output_size <= 0.0 {
            return Err(LayoutError::InvalidOutputSize {
                size: self.output_size,
            });
        }
        let non_negative = [
            ("space_width", self.space_width),
            ("max_width", self.max_width),
            ("max_height", self.max_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        for (name, value) in [("char_spacing", self.char_spacing), ("line_gap", self.line_gap)] {
            if !value.is_finite() {
                return Err(LayoutError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if !self.max_text_size.is_finite() || self.max_text_size <= 0.0 {
            return Err(LayoutError::InvalidParameter {
                name: "max_text_size".to_string(),
                value: self.max_text_size,
            });
        }
        Ok(())
    }

    /// Auto-fit runs only when enabled and at least one bound is set.
    pub fn autofit_enabled(&self) -> bool {
        self.auto_fit && (self.max_width > 0.0 || self.max_height > 0.0)
    }
}

/// A character positioned on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub character: char,
    /// Left edge of the character cell
    pub x: f64,
    /// Horizontal advance including spacing and kerning
    pub advance: f64,
    /// Whether the font can draw this character
    pub defined: bool,
}

/// One output line.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    /// Top edge of the line, measured down from the top of the block
    pub top: f64,
    /// Baseline, measured down from the top of the block
    pub baseline: f64,
    pub width: f64,
    pub glyphs: Vec<PlacedGlyph>,
}

impl LayoutLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Non-fatal layout findings.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// The font has no glyph for this character; it was skipped
    UndefinedCharacter { character: char },
}

/// Result of laying out a block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Effective size after auto-fit
    pub output_size: f64,
    /// Design units to output units
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub lines: Vec<LayoutLine>,
    pub warnings: Vec<LayoutWarning>,
}

impl TextLayout {
    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|l| l.glyphs.len()).sum()
    }
}

/// Lays out text in a font.
pub struct TextLayoutEngine<'a> {
    font: &'a Font,
    config: &'a LayoutConfig,
}

impl<'a> TextLayoutEngine<'a> {
    pub fn new(font: &'a Font, config: &'a LayoutConfig) -> Self {
        Self { font, config }
    }

    /// Lays out `text`, choosing the size by auto-fit when enabled.
    pub fn layout(&self, text: &str) -> Result<TextLayout, LayoutError> {
        self.config.validate()?;
        let resolved = self.font.resolve_text(text);
        let paragraphs = split_lines(&resolved);

        let size = if self.config.autofit_enabled() {
            self.autofit(&paragraphs)
        } else {
            self.config.output_size
        };

        Ok(self.layout_at(&paragraphs, size))
    }

    /// Largest size on the `start + k * AUTOFIT_STEP` grid whose block fits,
    /// or the configured size if none does.
    pub fn fit_size(&self, text: &str) -> Result<f64, LayoutError> {
        self.config.validate()?;
        let resolved = self.font.resolve_text(text);
        Ok(self.autofit(&split_lines(&resolved)))
    }

    /// Width of one line of text at `size`, including trailing spacing.
    pub fn measure_line(&self, text: &str, size: f64) -> f64 {
        let chars: Vec<char> = text.chars().collect();
        chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| self.advance(ch, chars.get(i + 1).copied(), size))
            .sum()
    }

    /// Splits one paragraph into lines no wider than `max_width`.
    pub fn wrap(&self, paragraph: &str, size: f64) -> Vec<String> {
        if self.config.max_width <= 0.0 || paragraph.is_empty() {
            return vec![paragraph.to_string()];
        }

        let mut lines = Vec::new();
        let mut current: Option<String> = None;
        for word in paragraph.split(' ') {
            current = Some(match current.take() {
                None => word.to_string(),
                Some(line) => {
                    let candidate = format!("{} {}", line, word);
                    if self.measure_line(&candidate, size) > self.config.max_width + FIT_EPSILON {
                        lines.push(line);
                        word.to_string()
                    } else {
                        candidate
                    }
                }
            });
        }
        lines.extend(current);
        lines
    }

    fn advance(&self, ch: char, next: Option<char>, size: f64) -> f64 {
        let scale = size / self.font.metrics.units_per_em;
        let base = match self.font.glyph_for(ch) {
            Some(glyph) => glyph.effective_advance() * scale,
            None if ch == ' ' => self.config.space_width,
            None => size * UNDEFINED_ADVANCE_FACTOR,
        };
        let kern = next.map_or(0.0, |n| self.font.kern(ch, n) * scale);
        base + self.config.char_spacing - kern
    }

    fn line_advance(&self, blank: bool, size: f64) -> f64 {
        if blank {
            size * BLANK_LINE_FACTOR
        } else {
            size + self.config.line_gap
        }
    }

    /// Block dimensions at `size` without building glyph placements.
    fn measure_block(&self, paragraphs: &[&str], size: f64) -> (f64, f64) {
        let mut width: f64 = 0.0;
        let mut height = 0.0;
        for paragraph in paragraphs {
            for line in self.wrap(paragraph, size) {
                width = width.max(self.measure_line(&line, size));
                height += self.line_advance(line.trim().is_empty(), size);
            }
        }
        (width, height)
    }

    fn fits(&self, width: f64, height: f64) -> bool {
        let width_ok = self.config.max_width <= 0.0 || width <= self.config.max_width + FIT_EPSILON;
        let height_ok =
            self.config.max_height <= 0.0 || height <= self.config.max_height + FIT_EPSILON;
        width_ok && height_ok
    }

    fn autofit(&self, paragraphs: &[&str]) -> f64 {
        let start = self.config.output_size;
        let mut best = None;
        let mut step = 0u32;
        loop {
            let candidate = start + f64::from(step) * AUTOFIT_STEP;
            if candidate > self.config.max_text_size + FIT_EPSILON {
                break;
            }
            let (width, height) = self.measure_block(paragraphs, candidate);
            if !self.fits(width, height) {
                debug!(candidate, width, height, "auto-fit candidate rejected");
                break;
            }
            best = Some(candidate);
            step += 1;
        }
        let size = best.unwrap_or(start);
        debug!(size, "auto-fit size chosen");
        size
    }

    fn layout_at(&self, paragraphs: &[&str], size: f64) -> TextLayout {
        let scale = size / self.font.metrics.units_per_em;
        let mut undefined = BTreeSet::new();
        let mut lines = Vec::new();
        let mut top = 0.0;
        let mut width: f64 = 0.0;

        for paragraph in paragraphs {
            for text in self.wrap(paragraph, size) {
                let chars: Vec<char> = text.chars().collect();
                let mut x = 0.0;
                let mut glyphs = Vec::with_capacity(chars.len());
                for (i, &ch) in chars.iter().enumerate() {
                    let advance = self.advance(ch, chars.get(i + 1).copied(), size);
                    let defined = self.font.glyph_for(ch).is_some();
                    if !defined && ch != ' ' {
                        undefined.insert(ch);
                    }
                    glyphs.push(PlacedGlyph {
                        character: ch,
                        x,
                        advance,
                        defined,
                    });
                    x += advance;
                }

                let blank = text.trim().is_empty();
                let advance = self.line_advance(blank, size);
                let baseline = top + if blank { advance } else { size };
                width = width.max(x);
                lines.push(LayoutLine {
                    text,
                    top,
                    baseline,
                    width: x,
                    glyphs,
                });
                top += advance;
            }
        }

        let warnings = undefined
            .into_iter()
            .map(|character| {
                warn!(character = %character, "no glyph defined; character skipped");
                LayoutWarning::UndefinedCharacter { character }
            })
            .collect();

        TextLayout {
            output_size: size,
            scale,
            width,
            height: top,
            lines,
            warnings,
        }
    }
}

/// Splits on newlines, accepting `\r\n`, keeping blank lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
