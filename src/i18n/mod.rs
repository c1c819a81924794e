// SPDX-License-Identifier: MPL-2.0
//! Localization with Fluent.
//!
//! Translation bundles (`assets/i18n/*.ftl`) are embedded in the binary. The
//! UI locale is taken from the `--lang` flag, then `[general] language`,
//! then the OS locale, falling back to `en-US`. Unknown keys render as
//! `MISSING: <key>` so gaps are visible during development.

pub mod fluent;

pub use fluent::I18n;
pub use fluent_bundle::FluentArgs;
