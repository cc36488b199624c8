//! G-code generation from compiled text.

use strokekit_core::{ExportError, Point, Units, YAxis};
use tracing::warn;

use crate::export::ExportConfig;
use crate::toolpath::{ArcSegment, CompiledText, PathSegment};

/// Start and end radii further apart than this are reported.
pub const ARC_RADIUS_MISMATCH: f64 = 0.01;

/// Formats a coordinate with three decimals, never printing `-0.000`.
fn fmt_coord(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

/// Collects program lines, dropping a line identical to the previous one.
#[derive(Debug, Default)]
struct Program {
    lines: Vec<String>,
}

impl Program {
    fn push(&mut self, line: String) {
        if self.lines.last() != Some(&line) {
            self.lines.push(line);
        }
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Converts compiled text to a G-code engraving program.
#[derive(Debug, Clone)]
pub struct GcodeEmitter {
    units: Units,
    feed_rate: f64,
    plunge_rate: f64,
    safe_z: f64,
    engrave_depth: f64,
}

impl GcodeEmitter {
    /// Creates a new emitter.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            units: config.units,
            feed_rate: config.feed_rate,
            plunge_rate: config.plunge_rate,
            safe_z: config.safe_z,
            engrave_depth: config.engrave_depth,
        }
    }

    /// Generates the whole program. Geometry must be compiled Y up.
    pub fn emit(&self, text: &CompiledText) -> Result<String, ExportError> {
        if text.y_axis != YAxis::Up {
            return Err(ExportError::InvalidParameter {
                name: "y_axis".to_string(),
                reason: "G-code output must be compiled with Y up".to_string(),
            });
        }

        let mut program = Program::default();
        self.generate_header(&mut program, text);

        let mut last_feed: Option<f64> = None;
        for stroke in &text.strokes {
            let Some(start) = stroke.start() else {
                continue;
            };
            program.push(format!("G00 Z{}", self.coord(self.safe_z)));
            program.push(format!("G00 X{} Y{}", self.coord(start.x), self.coord(start.y)));
            program.push(format!(
                "G01 Z{}{}",
                self.coord(-self.engrave_depth),
                feed_word(&mut last_feed, self.plunge_rate)
            ));

            let mut position = start;
            for segment in &stroke.segments {
                match segment {
                    PathSegment::Line(points) => {
                        for p in points {
                            if *p == position {
                                continue;
                            }
                            program.push(format!(
                                "G01 X{} Y{}{}",
                                self.coord(p.x),
                                self.coord(p.y),
                                feed_word(&mut last_feed, self.feed_rate)
                            ));
                            position = *p;
                        }
                    }
                    PathSegment::Arc(arc) => {
                        program.push(self.arc_move(arc, position, &mut last_feed));
                        position = arc.end;
                    }
                }
            }
            program.push(format!("G00 Z{}", self.coord(self.safe_z)));
        }

        self.generate_footer(&mut program);
        Ok(program.finish())
    }

    fn generate_header(&self, program: &mut Program, text: &CompiledText) {
        let unit_label = self.units.to_string();
        program.push("; StrokeKit engraving program".to_string());
        program.push(format!(
            "; Text size: {}{}",
            self.coord(text.output_size),
            unit_label
        ));
        program.push(format!(
            "; Extent: {} x {}{}",
            self.coord(text.width),
            self.coord(text.height),
            unit_label
        ));
        program.push(format!(
            "; Strokes: {} ({} arcs, {} lines)",
            text.strokes.len(),
            text.arc_count(),
            text.line_count()
        ));
        program.push(format!(
            "; Feed rate: {:.0} {}/min, plunge {:.0} {}/min",
            self.feed_rate, unit_label, self.plunge_rate, unit_label
        ));
        program.push(format!(
            "; Engrave depth: {}{}",
            self.coord(self.engrave_depth),
            unit_label
        ));
        program.push(String::new());

        let units_comment = match self.units {
            Units::Mm => "Millimeter units",
            Units::Inch => "Inch units",
        };
        program.push(format!("{} ; {}", self.units.gcode_word(), units_comment));
        program.push("G90 ; Absolute positioning".to_string());
        program.push("G17 ; XY plane".to_string());
    }

    fn generate_footer(&self, program: &mut Program) {
        program.push(format!("G00 Z{}", self.coord(self.safe_z)));
        program.push("G00 X0 Y0".to_string());
        program.push("M30 ; End of program".to_string());
    }

    fn arc_move(&self, arc: &ArcSegment, position: Point, last_feed: &mut Option<f64>) -> String {
        let mismatch = arc.radius_mismatch();
        if mismatch > ARC_RADIUS_MISMATCH {
            warn!(
                mismatch,
                radius = arc.radius,
                x = arc.end.x,
                y = arc.end.y,
                "arc start and end radii differ"
            );
        }
        let command = if arc.clockwise { "G02" } else { "G03" };
        format!(
            "{} X{} Y{} I{} J{}{}",
            command,
            self.coord(arc.end.x),
            self.coord(arc.end.y),
            self.coord(arc.center.x - position.x),
            self.coord(arc.center.y - position.y),
            feed_word(last_feed, self.feed_rate)
        )
    }

    fn coord(&self, mm: f64) -> String {
        fmt_coord(self.units.from_mm(mm))
    }
}

/// Returns ` F<rate>` when the rate differs from the last one emitted.
fn feed_word(last_feed: &mut Option<f64>, rate: f64) -> String {
    if *last_feed == Some(rate) {
        return String::new();
    }
    *last_feed = Some(rate);
    format!(" F{:.0}", rate)
}
