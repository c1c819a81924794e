// SPDX-License-Identifier: MPL-2.0
//! Catalog filtering and sorting.
//!
//! Filters are combined with AND logic: a variant is visible when every
//! active filter matches. An optional sort orders the visible variants by one
//! numeric metric; sorting is stable in both directions, so variants with
//! equal keys keep their dataset order.
//!
//! # Example
//!
//! ```
//! use variant_lens::catalog::filter::{CatalogFilter, SortDirection, SortKey, SortSpec};
//! use variant_lens::catalog::Catalog;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let filter = CatalogFilter {
//!     sort: Some(SortSpec::new(SortKey::Complexity, SortDirection::Descending)),
//!     ..CatalogFilter::default()
//! };
//!
//! let visible = filter.apply(catalog.variants());
//! assert!(visible.windows(2).all(|w| w[0].complexity >= w[1].complexity));
//! ```

use super::variant::{RefractionType, Variant};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Metric used to order variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    RefractionRate,
    ArtClarity,
    Complexity,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [
        SortKey::RefractionRate,
        SortKey::ArtClarity,
        SortKey::Complexity,
    ];

    #[must_use]
    pub fn value(self, variant: &Variant) -> f32 {
        match self {
            SortKey::RefractionRate => variant.refraction_rate,
            SortKey::ArtClarity => variant.art_clarity,
            SortKey::Complexity => variant.complexity,
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            SortKey::RefractionRate => "metric-refraction-rate",
            SortKey::ArtClarity => "metric-art-clarity",
            SortKey::Complexity => "metric-complexity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            SortDirection::Ascending => "sort-ascending",
            SortDirection::Descending => "sort-descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, a: &Variant, b: &Variant) -> Ordering {
        // Metrics are validated finite on load.
        let ordering = self
            .key
            .value(a)
            .partial_cmp(&self.key.value(b))
            .unwrap_or(Ordering::Equal);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which part of the filter a chip represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    BaseColor,
    RefractionType,
}

/// A removable chip describing one active filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub value: String,
    pub label: String,
    /// Swatch color for base color chips.
    pub color: Option<String>,
}

/// Complete filter selection. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_color: Option<String>,
    #[serde(default)]
    pub refraction_type: Option<RefractionType>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Ignore the category filter (used when browsing inside one category).
    #[serde(skip)]
    pub hide_category: bool,
}

impl CatalogFilter {
    /// Returns `true` if the variant passes every active filter.
    #[must_use]
    pub fn matches(&self, variant: &Variant) -> bool {
        let category = self.hide_category
            || self
                .category
                .as_ref()
                .is_none_or(|category| &variant.category == category);
        let base_color = self
            .base_color
            .as_ref()
            .is_none_or(|name| &variant.base_color.name == name);
        let refraction = self
            .refraction_type
            .is_none_or(|kind| variant.refraction_type == kind);

        category && base_color && refraction
    }

    /// Produces the visible subsequence, sorted when a sort is selected.
    #[must_use]
    pub fn apply<'a>(&self, variants: &'a [Variant]) -> Vec<&'a Variant> {
        let mut visible: Vec<&Variant> = variants.iter().filter(|v| self.matches(v)).collect();
        if let Some(sort) = self.sort {
            // `sort_by` is stable.
            visible.sort_by(|a, b| sort.compare(a, b));
        }
        visible
    }

    /// Chips for the active filters, in category / color / refraction order.
    #[must_use]
    pub fn active_filters(&self, variants: &[Variant]) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();

        if !self.hide_category {
            if let Some(category) = &self.category {
                chips.push(ActiveFilter {
                    kind: FilterKind::Category,
                    value: category.clone(),
                    label: super::variant::capitalize(category),
                    color: None,
                });
            }
        }

        if let Some(name) = &self.base_color {
            let color = base_colors(variants)
                .into_iter()
                .find(|color| &color.name == name)
                .map(|color| color.hex);
            chips.push(ActiveFilter {
                kind: FilterKind::BaseColor,
                value: name.clone(),
                label: name.clone(),
                color,
            });
        }

        if let Some(kind) = self.refraction_type {
            chips.push(ActiveFilter {
                kind: FilterKind::RefractionType,
                value: kind.as_str().to_string(),
                label: super::variant::capitalize(kind.as_str()),
                color: None,
            });
        }

        chips
    }

    /// Number of active chips plus one when sorted.
    #[must_use]
    pub fn active_count(&self, variants: &[Variant]) -> usize {
        self.active_filters(variants).len() + usize::from(self.sort.is_some())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        (!self.hide_category && self.category.is_some())
            || self.base_color.is_some()
            || self.refraction_type.is_some()
            || self.sort.is_some()
    }

    /// Clears the filter a chip represents.
    pub fn remove(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Category => self.category = None,
            FilterKind::BaseColor => self.base_color = None,
            FilterKind::RefractionType => self.refraction_type = None,
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Selects a sort key, keeping the current direction when one is set.
    pub fn set_sort_key(&mut self, key: SortKey) {
        let direction = self.sort.map(|s| s.direction).unwrap_or_default();
        self.sort = Some(SortSpec::new(key, direction));
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        if let Some(sort) = &mut self.sort {
            sort.direction = direction;
        }
    }
}

/// Distinct categories in first-appearance order.
#[must_use]
pub fn categories(variants: &[Variant]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for variant in variants {
        if !seen.contains(&variant.category) {
            seen.push(variant.category.clone());
        }
    }
    seen
}

/// Distinct base colors, unique by name; the first occurrence keeps its hex.
#[must_use]
pub fn base_colors(variants: &[Variant]) -> Vec<super::variant::BaseColor> {
    let mut seen: Vec<super::variant::BaseColor> = Vec::new();
    for variant in variants {
        if !seen.iter().any(|c| c.name == variant.base_color.name) {
            seen.push(variant.base_color.clone());
        }
    }
    seen
}
