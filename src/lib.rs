//! # StrokeKit
//!
//! Hand-drawn single-stroke fonts for engraving machines and plotters.
//!
//! ## Architecture
//!
//! StrokeKit is organized as a workspace with multiple crates:
//!
//! 1. **strokekit-core** - Points, bounds, units and error types
//! 2. **strokekit-designer** - Stroke simplification, arc fitting, glyph store,
//!    editor session, text layout, toolpath compilation and exporters
//! 3. **strokekit-settings** - JSON/TOML configuration files
//! 4. **strokekit** - Command line front end that ties the crates together
//!
//! ## Features
//!
//! - **Freehand Glyphs**: Pointer samples reduced with Douglas-Peucker
//! - **Arc Fitting**: Strokes compiled to lines plus G02/G03 arcs
//! - **Layout**: Kerning, word wrap and auto-fit into a bounding box
//! - **Exports**: G-code, SVG, DXF, PNG and SVG fonts

pub mod cli;

pub use strokekit_core::{Error, Result, Units};
pub use strokekit_designer as designer;
pub use strokekit_settings as settings;

pub use strokekit_designer::{
    export_text, EditorSession, ExportConfig, ExportFormat, Font, LayoutConfig, SvgFontWriter,
    TextLayoutEngine, ToolpathCompiler,
};
pub use strokekit_settings::Config;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date, stamped by the build script
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Installs a pretty formatter on stderr filtered by `RUST_LOG`. `verbose`
/// raises the default level from info to debug.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
