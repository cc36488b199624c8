//! Command line interface
//!
//! Examples:
//!   strokekit --font hand.json --output hello.gcode "HELLO"
//!   strokekit --font hand.json --output sign.svg --max-width 80 --auto-fit "OPEN\nDAILY"
//!   strokekit --font hand.json --svg-font hand.svg

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use strokekit_designer::{export_to_path, ExportFormat, Font, SvgFontWriter};
use strokekit_settings::Config;
use tracing::info;

/// StrokeKit CLI arguments
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "strokekit",
    version,
    about = "Compile text set in a hand-drawn stroke font to G-code, SVG, DXF or PNG"
)]
pub struct CliArgs {
    /// Font file (JSON glyph store). Falls back to `font` in the config file.
    #[clap(long, short = 'f')]
    pub font: Option<PathBuf>,

    /// Configuration file (.toml or .json). Defaults to the user config file when present.
    #[clap(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output format: gcode, svg, dxf or png. Inferred from the output extension when omitted.
    #[clap(long, short = 't')]
    pub format: Option<ExportFormat>,

    /// Output file for the rendered text
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Writes the font as an SVG font file
    #[clap(long = "svg-font")]
    pub svg_font: Option<PathBuf>,

    /// Text height in output units
    #[clap(long)]
    pub size: Option<f64>,

    /// Wrap width in output units
    #[clap(long = "max-width")]
    pub max_width: Option<f64>,

    /// Height limit in output units
    #[clap(long = "max-height")]
    pub max_height: Option<f64>,

    /// Grow the text to the largest size that fits the limits
    #[clap(long = "auto-fit")]
    pub auto_fit: bool,

    /// Debug logging
    #[clap(long, short = 'v')]
    pub verbose: bool,

    /// Text to render. A literal `\n` starts a new line.
    pub text: Option<String>,
}

impl CliArgs {
    /// Loads the configuration and applies command line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => match Config::default_path() {
                Ok(path) => Config::load_or_default(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                Err(_) => Config::default(),
            },
        };

        if let Some(size) = self.size {
            config.layout.output_size = size;
        }
        if let Some(max_width) = self.max_width {
            config.layout.max_width = max_width;
        }
        if let Some(max_height) = self.max_height {
            config.layout.max_height = max_height;
        }
        if self.auto_fit {
            config.layout.auto_fit = true;
        }
        if let Some(font) = &self.font {
            config.font = Some(font.clone());
        }
        config.validate()?;
        Ok(config)
    }

    fn output_format(&self, output: &Path) -> anyhow::Result<ExportFormat> {
        match self.format.or_else(|| ExportFormat::from_path(output)) {
            Some(format) => Ok(format),
            None => bail!(
                "cannot infer the format of {}; pass --format",
                output.display()
            ),
        }
    }
}

/// Reads a glyph store from disk.
pub fn load_font(path: &Path) -> anyhow::Result<Font> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading font {}", path.display()))?;
    let font = Font::from_json(&json).with_context(|| format!("parsing font {}", path.display()))?;
    info!(path = %path.display(), glyphs = font.glyphs().len(), "loaded font");
    Ok(font)
}

/// Runs the command described by `args`.
pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let Some(font_path) = config.font.as_deref() else {
        bail!("no font given; pass --font or set `font` in the config file");
    };
    let font = load_font(font_path)?;

    if args.output.is_none() && args.svg_font.is_none() {
        bail!("nothing to do; pass --output and text, or --svg-font");
    }

    if let Some(path) = &args.svg_font {
        let id = font_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("strokekit");
        std::fs::write(path, SvgFontWriter::new(id).write(&font))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote SVG font");
    }

    if let Some(output) = &args.output {
        let Some(text) = &args.text else {
            bail!("no text given for {}", output.display());
        };
        let text = text.replace("\\n", "\n");
        let format = args.output_format(output)?;
        export_to_path(&font, &text, &config.layout, &config.export, format, output)
            .with_context(|| format!("exporting {}", output.display()))?;
    }
    Ok(())
}
