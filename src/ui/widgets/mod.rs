// SPDX-License-Identifier: MPL-2.0
pub mod animated_spinner;
mod arc;
pub mod gauge;

pub use animated_spinner::AnimatedSpinner;
pub use gauge::{comparison_bar, metric_gauge};
