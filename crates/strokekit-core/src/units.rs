//! Unit conversion utilities
//!
//! Output geometry is computed in millimetres; G-code can be emitted in
//! inches by converting at emission time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output length units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (metric)
    #[default]
    Mm,
    /// Inches (imperial)
    Inch,
}

impl Units {
    /// Convert a millimetre value into these units
    pub fn from_mm(self, value: f64) -> f64 {
        match self {
            Units::Mm => value,
            Units::Inch => value / 25.4,
        }
    }

    /// G-code unit selection word
    pub fn gcode_word(self) -> &'static str {
        match self {
            Units::Mm => "G21",
            Units::Inch => "G20",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Mm => write!(f, "mm"),
            Units::Inch => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "metric" => Ok(Self::Mm),
            "in" | "inch" | "imperial" => Ok(Self::Inch),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}
