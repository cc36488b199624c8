//! PNG raster export.
//!
//! Strokes are drawn with tiny-skia at three times the target resolution and
//! downsampled, which gives smooth edges on thin engraving strokes.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use strokekit_core::ExportError;
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::arc_expander::ArcExpander;
use crate::export::ExportConfig;
use crate::toolpath::CompiledText;

/// Render resolution multiplier before downsampling.
pub const SUPERSAMPLE: u32 = 3;

/// Largest accepted output edge, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

fn background_color() -> Color {
    Color::WHITE
}

fn ink_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

/// Renders compiled text to an image.
#[derive(Debug, Clone)]
pub struct RasterExporter {
    pixels_per_unit: f64,
    stroke_width: f64,
    margin: f64,
    expander: ArcExpander,
}

impl RasterExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            pixels_per_unit: config.pixels_per_unit,
            stroke_width: config.stroke_width,
            margin: config.margin,
            expander: ArcExpander::default(),
        }
    }

    /// Final image size in pixels.
    pub fn dimensions(&self, text: &CompiledText) -> Result<(u32, u32), ExportError> {
        let to_px = |mm: f64| ((mm + 2.0 * self.margin) * self.pixels_per_unit).ceil();
        let (width, height) = (to_px(text.width), to_px(text.height));
        let limit = f64::from(MAX_DIMENSION);
        if !(width >= 1.0 && height >= 1.0 && width <= limit && height <= limit) {
            return Err(ExportError::InvalidParameter {
                name: "pixels_per_unit".to_string(),
                reason: format!("image size {}x{} px is out of range", width, height),
            });
        }
        Ok((width as u32, height as u32))
    }

    /// Renders to an RGBA image at the final resolution.
    pub fn render(&self, text: &CompiledText) -> Result<RgbaImage, ExportError> {
        let (width, height) = self.dimensions(text)?;
        let (big_w, big_h) = (width * SUPERSAMPLE, height * SUPERSAMPLE);
        let mut pixmap = Pixmap::new(big_w, big_h)
            .ok_or_else(|| ExportError::Image(format!("cannot allocate {}x{} canvas", big_w, big_h)))?;
        pixmap.fill(background_color());

        let px_per_mm = (self.pixels_per_unit * f64::from(SUPERSAMPLE)) as f32;
        let offset = self.margin as f32 * px_per_mm;
        let transform = Transform::from_scale(px_per_mm, px_per_mm).post_translate(offset, offset);

        let mut paint = Paint::default();
        paint.set_color(ink_color());
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.stroke_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        for compiled in &text.strokes {
            let points = compiled.polyline(&self.expander);
            let Some((first, rest)) = points.split_first() else {
                continue;
            };
            let mut pb = PathBuilder::new();
            pb.move_to(first.x as f32, first.y as f32);
            if rest.is_empty() {
                pb.line_to(first.x as f32 + 1e-3, first.y as f32);
            }
            for p in rest {
                pb.line_to(p.x as f32, p.y as f32);
            }
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }

        // Opaque background, so premultiplied and straight alpha coincide.
        let large = RgbaImage::from_raw(big_w, big_h, pixmap.data().to_vec())
            .ok_or_else(|| ExportError::Image("pixel buffer size mismatch".to_string()))?;
        Ok(imageops::resize(&large, width, height, FilterType::Triangle))
    }

    /// Renders and encodes as PNG.
    pub fn export(&self, text: &CompiledText) -> Result<Vec<u8>, ExportError> {
        let image = self.render(text)?;
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| ExportError::Image(e.to_string()))?;
        Ok(buffer)
    }
}
