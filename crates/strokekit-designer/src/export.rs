//! Export entry points shared by every output format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strokekit_core::{ExportError, Result, Units, YAxis};
use tracing::info;

use crate::dxf_export::DxfExporter;
use crate::font::Font;
use crate::gcode_gen::GcodeEmitter;
use crate::layout::{LayoutConfig, TextLayoutEngine};
use crate::raster_export::RasterExporter;
use crate::svg_export::SvgExporter;
use crate::toolpath::{CompiledText, ToolpathCompiler};

/// Output encoder options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Maximum distance between a stroke and its fitted arc, in design units
    pub arc_tolerance: f64,
    /// Cutting feed, in units per minute
    pub feed_rate: f64,
    /// Plunge feed, in units per minute
    pub plunge_rate: f64,
    /// Travel height above the work
    pub safe_z: f64,
    /// Cutting depth below the surface
    pub engrave_depth: f64,
    pub units: Units,
    /// Raster resolution, pixels per mm
    pub pixels_per_unit: f64,
    /// Pen width for SVG and raster output, in mm
    pub stroke_width: f64,
    /// Blank border around SVG and raster output, in mm
    pub margin: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            arc_tolerance: 0.5,
            feed_rate: 500.0,
            plunge_rate: 100.0,
            safe_z: 5.0,
            engrave_depth: 0.5,
            units: Units::Mm,
            pixels_per_unit: 10.0,
            stroke_width: 0.5,
            margin: 2.0,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> std::result::Result<(), ExportError> {
        let positive = [
            ("arc_tolerance", self.arc_tolerance),
            ("feed_rate", self.feed_rate),
            ("plunge_rate", self.plunge_rate),
            ("pixels_per_unit", self.pixels_per_unit),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(name, format!("must be positive, got {}", value)));
            }
        }
        let non_negative = [
            ("safe_z", self.safe_z),
            ("engrave_depth", self.engrave_depth),
            ("margin", self.margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, format!("must not be negative, got {}", value)));
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: String) -> ExportError {
    ExportError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Gcode,
    Svg,
    Dxf,
    Png,
}

impl ExportFormat {
    /// Vertical orientation of the format's coordinate system.
    pub fn y_axis(self) -> YAxis {
        match self {
            ExportFormat::Gcode | ExportFormat::Dxf => YAxis::Up,
            ExportFormat::Svg | ExportFormat::Png => YAxis::Down,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gcode => "gcode",
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
            ExportFormat::Png => "png",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "nc" | "ngc" | "tap" => Some(ExportFormat::Gcode),
            other => other.parse().ok(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcode" | "g-code" => Ok(Self::Gcode),
            "svg" => Ok(Self::Svg),
            "dxf" => Ok(Self::Dxf),
            "png" => Ok(Self::Png),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Rejects inputs that would produce an empty file.
pub fn check_inputs(font: &Font, text: &str) -> std::result::Result<(), ExportError> {
    if font.is_empty() {
        return Err(ExportError::EmptyFont);
    }
    if text.trim().is_empty() {
        return Err(ExportError::EmptyText);
    }
    Ok(())
}

/// Lays out and compiles `text` for `format` without encoding it.
pub fn compile_text(
    font: &Font,
    text: &str,
    layout_config: &LayoutConfig,
    export_config: &ExportConfig,
    format: ExportFormat,
) -> Result<CompiledText> {
    check_inputs(font, text)?;
    export_config.validate()?;
    let layout = TextLayoutEngine::new(font, layout_config).layout(text)?;
    let compiler = ToolpathCompiler::with_tolerance(export_config.arc_tolerance);
    Ok(compiler.compile(font, &layout, format.y_axis()))
}

/// Renders `text` in `format` and returns the encoded file contents.
pub fn export_text(
    font: &Font,
    text: &str,
    layout_config: &LayoutConfig,
    export_config: &ExportConfig,
    format: ExportFormat,
) -> Result<Vec<u8>> {
    let compiled = compile_text(font, text, layout_config, export_config, format)?;
    let bytes = match format {
        ExportFormat::Gcode => GcodeEmitter::new(export_config).emit(&compiled)?.into_bytes(),
        ExportFormat::Svg => SvgExporter::new(export_config).export(&compiled).into_bytes(),
        ExportFormat::Dxf => DxfExporter::new(export_config).export(&compiled)?,
        ExportFormat::Png => RasterExporter::new(export_config).export(&compiled)?,
    };
    info!(
        format = %format,
        bytes = bytes.len(),
        strokes = compiled.strokes.len(),
        size = compiled.output_size,
        "exported text"
    );
    Ok(bytes)
}

/// Exports straight to a file. Nothing is created when the export fails.
pub fn export_to_path(
    font: &Font,
    text: &str,
    layout_config: &LayoutConfig,
    export_config: &ExportConfig,
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    let bytes = export_text(font, text, layout_config, export_config, format)?;
    std::fs::write(path, bytes).map_err(ExportError::Io)?;
    Ok(())
}
