//! DXF polyline export.
//!
//! Each stroke becomes one open `LWPOLYLINE` with arcs tessellated. The
//! drawing header declares millimetre units and Y grows upward.

use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::enums::{AcadVersion, Units as DxfUnits};
use dxf::{Drawing, LwPolylineVertex};
use strokekit_core::{ExportError, YAxis};

use crate::arc_expander::ArcExpander;
use crate::export::ExportConfig;
use crate::toolpath::CompiledText;

/// Writes compiled text as a DXF drawing.
#[derive(Debug, Clone, Default)]
pub struct DxfExporter {
    expander: ArcExpander,
}

impl DxfExporter {
    pub fn new(_config: &ExportConfig) -> Self {
        Self::default()
    }

    /// Builds the drawing in memory.
    pub fn drawing(&self, text: &CompiledText) -> Result<Drawing, ExportError> {
        if text.y_axis != YAxis::Up {
            return Err(ExportError::InvalidParameter {
                name: "y_axis".to_string(),
                reason: "DXF output must be compiled with Y up".to_string(),
            });
        }

        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2000;
        drawing.header.default_drawing_units = DxfUnits::Millimeters;

        for stroke in &text.strokes {
            let mut points = stroke.polyline(&self.expander);
            if points.len() == 1 {
                points.push(points[0]);
            }
            if points.is_empty() {
                continue;
            }
            let mut polyline = LwPolyline::default();
            polyline.vertices = points
                .iter()
                .map(|p| LwPolylineVertex {
                    x: p.x,
                    y: p.y,
                    ..Default::default()
                })
                .collect();
            drawing.add_entity(Entity::new(EntityType::LwPolyline(polyline)));
        }
        Ok(drawing)
    }

    /// Encodes the drawing as ASCII DXF.
    pub fn export(&self, text: &CompiledText) -> Result<Vec<u8>, ExportError> {
        let drawing = self.drawing(text)?;
        let mut buffer = Vec::new();
        drawing
            .save(&mut buffer)
            .map_err(|e| ExportError::Dxf(e.to_string()))?;
        Ok(buffer)
    }
}
