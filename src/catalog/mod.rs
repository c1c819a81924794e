// SPDX-License-Identifier: MPL-2.0
//! Variant catalog: dataset loading, categories, filtering and sorting.

pub mod dataset;
pub mod filter;
pub mod variant;

pub use crate::error::CatalogError;
pub use dataset::Catalog;
pub use filter::{ActiveFilter, CatalogFilter, FilterKind, SortDirection, SortKey, SortSpec};
pub use variant::{
    Balance, BaseColor, Category, ComplexityLevel, Pattern, RefractionType, Variant,
};
