//! Configuration file handling for StrokeKit
//!
//! A [`Config`] bundles the layout, export and editor option sets. Files are
//! JSON or TOML, chosen by extension, and every field has a default so a
//! partial file only overrides what it names:
//!
//! ```toml
//! [layout]
//! output_size = 12.0
//! max_width = 80.0
//! auto_fit = true
//!
//! [export]
//! feed_rate = 800.0
//! units = "mm"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strokekit_designer::{EditorSettings, ExportConfig, LayoutConfig};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "strokekit";

/// File name of the default configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Font file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Text layout options
    pub layout: LayoutConfig,
    /// Toolpath and file export options
    pub export: ExportConfig,
    /// Glyph editor options
    pub editor: EditorSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/strokekit/config.toml` for the current platform.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
            })
    }

    /// Parses and validates config text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serializes to the given format.
    pub fn render(&self, format: ConfigFormat) -> SettingsResult<String> {
        match format {
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.render(ConfigFormat::from_path(path)?)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.layout.validate()?;
        self.export.validate()?;

        let editor = &self.editor;
        if !editor.simplify_tolerance.is_finite() || editor.simplify_tolerance < 0.0 {
            return Err(invalid("editor.simplify_tolerance", "must not be negative"));
        }
        if editor.history_depth == 0 {
            return Err(invalid("editor.history_depth", "must be > 0"));
        }
        let canvas = &editor.canvas;
        if !(canvas.units_per_pixel > 0.0) || !(canvas.width_px > 0.0) || !(canvas.height_px > 0.0) {
            return Err(invalid("editor.canvas", "dimensions and scale must be > 0"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
