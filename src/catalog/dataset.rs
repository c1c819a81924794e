// SPDX-License-Identifier: MPL-2.0
//! Loading and validation of the static variant dataset.
//!
//! The dataset is a TOML document with a `[[variants]]` array and an optional
//! `[[categories]]` array supplying display names. A default dataset is
//! embedded in the binary; a file on disk can replace it.

use super::variant::{capitalize, Category, Variant, COMPLEXITY_MAX, PERCENT_MAX};
use crate::error::{CatalogError, Error, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "assets/catalog/"]
struct Asset;

const EMBEDDED_FILE: &str = "variants.toml";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<CategoryLabel>,
    #[serde(default)]
    variants: Vec<Variant>,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoryLabel {
    name: String,
    display_name: String,
}

/// Read-only variant collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: Vec<Variant>,
    labels: Vec<(String, String)>,
}

impl Catalog {
    /// Parses and validates a TOML dataset.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|err| CatalogError::Parse(err.to_string()))?;

        if file.variants.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, variant) in file.variants.iter().enumerate() {
            validate(index, variant)?;
            if file.variants[..index]
                .iter()
                .any(|earlier| earlier.name == variant.name)
            {
                return Err(CatalogError::DuplicateName {
                    variant: variant.name.clone(),
                    index,
                });
            }
        }

        Ok(Self {
            variants: file.variants,
            labels: file
                .categories
                .into_iter()
                .map(|label| (label.name, label.display_name))
                .collect(),
        })
    }

    /// Loads the dataset bundled with the application.
    pub fn embedded() -> Result<Self> {
        let file = Asset::get(EMBEDDED_FILE)
            .ok_or_else(|| Error::Io(format!("missing embedded {}", EMBEDDED_FILE)))?;
        let content = String::from_utf8_lossy(file.data.as_ref());
        Ok(Self::from_toml_str(&content)?)
    }

    /// Loads a dataset from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Loads `path` when given, otherwise the embedded dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading catalog from file");
                Self::load_from_path(path)
            }
            None => Self::embedded(),
        }
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.name == name)
    }

    /// Display label for a category tag.
    #[must_use]
    pub fn display_name(&self, category: &str) -> String {
        self.labels
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| capitalize(category))
    }

    /// Groups variants by category, in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for variant in &self.variants {
            match categories.iter_mut().find(|c| c.name == variant.category) {
                Some(category) => category.variants.push(variant.clone()),
                None => categories.push(Category {
                    name: variant.category.clone(),
                    display_name: self.display_name(&variant.category),
                    variants: vec![variant.clone()],
                }),
            }
        }
        categories
    }
}

fn validate(index: usize, variant: &Variant) -> std::result::Result<(), CatalogError> {
    if variant.name.trim().is_empty() {
        return Err(CatalogError::UnnamedVariant { index });
    }

    let metrics = [
        ("refraction_rate", variant.refraction_rate, PERCENT_MAX),
        ("art_clarity", variant.art_clarity, PERCENT_MAX),
        ("complexity", variant.complexity, COMPLEXITY_MAX),
        ("clean_vs_busy", variant.clean_vs_busy, PERCENT_MAX),
    ];
    for (metric, value, max) in metrics {
        if !(0.0..=max).contains(&value) {
            return Err(CatalogError::MetricOutOfRange {
                variant: variant.name.clone(),
                metric,
                value,
                max,
            });
        }
    }

    if variant.base_color.rgb().is_none() {
        return Err(CatalogError::InvalidColor {
            variant: variant.name.clone(),
            hex: variant.base_color.hex.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn variant_toml(name: &str, category: &str, complexity: f32) -> String {
        format!(
            r##"
[[variants]]
name = "{name}"
category = "{category}"
refraction_type = "color"
refraction_rate = 50
art_clarity = 60
complexity = {complexity}
clean_vs_busy = 40
base_color = {{ name = "Silver", hex = "#C0C0C0" }}
pattern = {{ name = "Plain", description = "" }}
"##
        )
    }

    #[test]
    fn embedded_catalog_loads_and_has_four_categories() {
        let catalog = Catalog::embedded().expect("embedded catalog should be valid");
        assert!(!catalog.is_empty());
        assert_eq!(catalog.categories().len(), 4);
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let content = [
            variant_toml("a", "beta", 1.0),
            variant_toml("b", "alpha", 2.0),
            variant_toml("c", "beta", 3.0),
        ]
        .concat();
        let catalog = Catalog::from_toml_str(&content).expect("valid dataset");
        let categories = catalog.categories();

        assert_eq!(categories[0].name, "beta");
        assert_eq!(categories[1].name, "alpha");
        let names: Vec<_> = categories[0].variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn declared_display_names_override_capitalization() {
        let content = format!(
            "[[categories]]\nname = \"beta\"\ndisplay_name = \"Beta Series\"\n{}{}",
            variant_toml("a", "beta", 1.0),
            variant_toml("b", "alpha", 2.0)
        );
        let catalog = Catalog::from_toml_str(&content).expect("valid dataset");
        assert_eq!(catalog.display_name("beta"), "Beta Series");
        assert_eq!(catalog.display_name("alpha"), "Alpha");
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(
            Catalog::from_toml_str("").unwrap_err(),
            CatalogError::Empty
        );
    }

    #[test]
    fn out_of_range_complexity_is_rejected() {
        let err = Catalog::from_toml_str(&variant_toml("a", "beta", 1500.0)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MetricOutOfRange {
                metric: "complexity",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_variant_names_are_rejected() {
        let dataset = format!(
            "{}{}{}",
            variant_toml("Aurora", "alpha", 100.0),
            variant_toml("Borealis", "alpha", 200.0),
            variant_toml("Aurora", "beta", 300.0)
        );
        assert_eq!(
            Catalog::from_toml_str(&dataset).unwrap_err(),
            CatalogError::DuplicateName {
                variant: "Aurora".into(),
                index: 2,
            }
        );
    }

    #[test]
    fn invalid_toml_reports_parse_error() {
        let err = Catalog::from_toml_str("not = valid = toml").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("variants.toml");
        std::fs::write(&path, variant_toml("Aurora", "prism", 10.0)).expect("write dataset");

        let catalog = Catalog::load(Some(&path)).expect("dataset should load");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Aurora").is_some());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let err = Catalog::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
