// SPDX-License-Identifier: MPL-2.0
//! Variant records and the categories derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the percentage-style metrics.
pub const PERCENT_MAX: f32 = 100.0;

/// Upper bound of the complexity score.
pub const COMPLEXITY_MAX: f32 = 1000.0;

/// Base color name that marks a variant as a specialty finish.
pub const SPECIALTY_COLOR: &str = "Specialty";

/// How a variant refracts light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefractionType {
    Color,
    Monochrome,
}

impl RefractionType {
    pub const ALL: [RefractionType; 2] = [RefractionType::Color, RefractionType::Monochrome];

    /// Returns the i18n key for the display label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            RefractionType::Color => "refraction-color",
            RefractionType::Monochrome => "refraction-monochrome",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RefractionType::Color => "color",
            RefractionType::Monochrome => "monochrome",
        }
    }
}

impl fmt::Display for RefractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseColor {
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub hex: String,
}

impl BaseColor {
    /// Parses the hex code into RGB components.
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.hex)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single product/material configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub category: String,
    pub base_color: BaseColor,
    pub pattern: Pattern,
    pub refraction_type: RefractionType,
    /// 0-100.
    pub refraction_rate: f32,
    /// 0-100 percent.
    pub art_clarity: f32,
    /// 0-1000.
    pub complexity: f32,
    /// 0 (clean) to 100 (busy).
    pub clean_vs_busy: f32,
    /// Turntable subject that shows this variant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Variant {
    #[must_use]
    pub fn is_specialty(&self) -> bool {
        self.base_color.name == SPECIALTY_COLOR
    }

    #[must_use]
    pub fn balance(&self) -> Balance {
        Balance::classify(self.clean_vs_busy)
    }

    #[must_use]
    pub fn complexity_level(&self) -> ComplexityLevel {
        ComplexityLevel::classify(self.complexity)
    }
}

/// Position on the clean-vs-busy scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Clean,
    Balanced,
    Busy,
}

impl Balance {
    #[must_use]
    pub fn classify(value: f32) -> Self {
        if value < 30.0 {
            Balance::Clean
        } else if value > 70.0 {
            Balance::Busy
        } else {
            Balance::Balanced
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Balance::Clean => "balance-clean",
            Balance::Balanced => "balance-balanced",
            Balance::Busy => "balance-busy",
        }
    }
}

/// Bucket of the complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    #[must_use]
    pub fn classify(value: f32) -> Self {
        if value < COMPLEXITY_MAX * 0.3 {
            ComplexityLevel::Simple
        } else if value > COMPLEXITY_MAX * 0.7 {
            ComplexityLevel::Complex
        } else {
            ComplexityLevel::Moderate
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "complexity-simple",
            ComplexityLevel::Moderate => "complexity-moderate",
            ComplexityLevel::Complex => "complexity-complex",
        }
    }
}

/// Named grouping of variants, derived from the variant set.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub display_name: String,
    pub variants: Vec<Variant>,
}

/// Capitalizes the first character, used when no display name is declared.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses `#rrggbb`.
#[must_use]
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
