//! StrokeKit Settings Crate
//!
//! Loads and saves the layout, export and editor options as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, APP_DIR, CONFIG_FILE};
pub use error::{SettingsError, SettingsResult};
