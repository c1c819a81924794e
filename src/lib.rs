// SPDX-License-Identifier: MPL-2.0
//! `variant_lens` is a variant catalog browser with an image-sequence
//! turntable viewer, built with the Iced GUI framework.
//!
//! The catalog filters and sorts a static dataset of product variants; the
//! turntable steps through numbered still images to simulate rotation, with
//! drag scrubbing and a magnifier.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod turntable;
pub mod ui;
