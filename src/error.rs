// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
}

/// Validation failures raised while reading a variant dataset.
/// Each variant carries enough context to point at the offending record.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The dataset could not be parsed as TOML.
    Parse(String),

    /// The dataset parsed but contains no variants.
    Empty,

    /// A metric is outside its documented range.
    MetricOutOfRange {
        variant: String,
        metric: &'static str,
        value: f32,
        max: f32,
    },

    /// A variant has an empty name.
    UnnamedVariant { index: usize },

    /// A base color hex code is not `#RRGGBB`.
    InvalidColor { variant: String, hex: String },

    /// Two variants share a name. `index` points at the later one.
    DuplicateName { variant: String, index: usize },
}

impl CatalogError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CatalogError::Parse(_) => "error-catalog-parse",
            CatalogError::Empty => "error-catalog-empty",
            CatalogError::MetricOutOfRange { .. } => "error-catalog-metric",
            CatalogError::UnnamedVariant { .. } => "error-catalog-unnamed",
            CatalogError::InvalidColor { .. } => "error-catalog-color",
            CatalogError::DuplicateName { .. } => "error-catalog-duplicate",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "Invalid catalog file: {}", msg),
            CatalogError::Empty => write!(f, "Catalog contains no variants"),
            CatalogError::MetricOutOfRange {
                variant,
                metric,
                value,
                max,
            } => write!(
                f,
                "Variant '{}' has {} = {} (expected 0..={})",
                variant, metric, value, max
            ),
            CatalogError::UnnamedVariant { index } => {
                write!(f, "Variant #{} has an empty name", index + 1)
            }
            CatalogError::InvalidColor { variant, hex } => {
                write!(f, "Variant '{}' has invalid color '{}'", variant, hex)
            }
            CatalogError::DuplicateName { variant, index } => {
                write!(f, "Variant #{} reuses the name '{}'", index + 1, variant)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
