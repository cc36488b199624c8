//! Rule-based kerning
//!
//! Rules pair two selectors with an adjustment in design units. A selector
//! is a single character, a comma-separated list (`A,V,W`) or an inclusive
//! ASCII code-point range (`A-Z`). Every rule matching a pair contributes, so the
//! kerning value of a pair is the sum of all matching adjustments in
//! insertion order.

use serde::{Deserialize, Serialize};
use strokekit_core::GlyphError;

/// One side of a kerning rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KernSelector {
    /// Exactly one character
    Char(char),
    /// Any character in the list
    List(Vec<char>),
    /// Any character between the bounds, inclusive
    Range(char, char),
}

impl KernSelector {
    /// Parses a selector string.
    pub fn parse(raw: &str) -> Result<Self, GlyphError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GlyphError::InvalidKernRule {
                reason: "selector is empty".to_string(),
            });
        }

        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() == 1 {
            return Ok(Self::Char(chars[0]));
        }

        if chars.len() == 3 && chars[1] == '-' {
            let (lo, hi) = (chars[0], chars[2]);
            if !lo.is_ascii() || !hi.is_ascii() {
                return Err(GlyphError::InvalidKernRule {
                    reason: format!("range '{}' must have ASCII bounds", trimmed),
                });
            }
            if lo > hi {
                return Err(GlyphError::InvalidKernRule {
                    reason: format!("range '{}' is reversed", trimmed),
                });
            }
            return Ok(Self::Range(lo, hi));
        }

        if trimmed.contains(',') {
            let mut members = Vec::new();
            for item in trimmed.split(',') {
                let mut item_chars = item.trim().chars();
                match (item_chars.next(), item_chars.next()) {
                    (Some(c), None) => members.push(c),
                    (None, _) => {}
                    _ => {
                        return Err(GlyphError::InvalidKernRule {
                            reason: format!("list item '{}' is not a single character", item),
                        })
                    }
                }
            }
            if members.is_empty() {
                return Err(GlyphError::InvalidKernRule {
                    reason: "selector list is empty".to_string(),
                });
            }
            return Ok(Self::List(members));
        }

        Err(GlyphError::InvalidKernRule {
            reason: format!("unrecognised selector '{}'", trimmed),
        })
    }

    /// Whether `ch` is selected.
    pub fn matches(&self, ch: char) -> bool {
        match self {
            Self::Char(c) => *c == ch,
            Self::List(list) => list.contains(&ch),
            Self::Range(lo, hi) => (*lo..=*hi).contains(&ch),
        }
    }

    /// True for the single-character form.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    /// Characters of `candidates` selected by this selector, in order.
    pub fn members<I>(&self, candidates: I) -> Vec<char>
    where
        I: IntoIterator<Item = char>,
    {
        candidates.into_iter().filter(|c| self.matches(*c)).collect()
    }
}

impl std::fmt::Display for KernSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::List(list) => {
                let joined: Vec<String> = list.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", joined.join(","))
            }
            Self::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

impl TryFrom<String> for KernSelector {
    type Error = GlyphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KernSelector> for String {
    fn from(value: KernSelector) -> Self {
        value.to_string()
    }
}

/// A kerning rule between a left and a right selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernRule {
    pub left: KernSelector,
    pub right: KernSelector,
    /// Adjustment in design units; positive values pull the pair together
    pub adjustment: f64,
}

impl KernRule {
    /// Builds a rule from selector strings, validating all parts.
    pub fn new(left: &str, right: &str, adjustment: f64) -> Result<Self, GlyphError> {
        if !adjustment.is_finite() {
            return Err(GlyphError::InvalidKernRule {
                reason: format!("adjustment {} is not finite", adjustment),
            });
        }
        Ok(Self {
            left: KernSelector::parse(left)?,
            right: KernSelector::parse(right)?,
            adjustment,
        })
    }

    /// Builds a rule from raw text fields, as typed by a user.
    pub fn parse(left: &str, right: &str, adjustment: &str) -> Result<Self, GlyphError> {
        let value: f64 = adjustment
            .trim()
            .parse()
            .map_err(|_| GlyphError::InvalidKernRule {
                reason: format!("adjustment '{}' is not a number", adjustment.trim()),
            })?;
        Self::new(left, right, value)
    }

    pub fn matches(&self, left: char, right: char) -> bool {
        self.left.matches(left) && self.right.matches(right)
    }
}

/// Sums the adjustments of every rule matching the pair.
pub fn kern_value(rules: &[KernRule], left: char, right: char) -> f64 {
    rules
        .iter()
        .filter(|rule| rule.matches(left, right))
        .map(|rule| rule.adjustment)
        .sum()
}
