// SPDX-License-Identifier: MPL-2.0
//! User interface: design tokens, styles, widgets and the two components.

pub mod catalog;
pub mod design_tokens;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod turntable;
pub mod widgets;
