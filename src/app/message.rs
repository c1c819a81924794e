// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::{catalog, notifications, turntable};

/// Top-level messages consumed by `App::update`. Each variant forwards a
/// component message so there is a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Catalog(catalog::Message),
    Turntable(turntable::Message),
    Notification(notifications::Message),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override (e.g. `fr`).
    pub lang: Option<String>,
    /// Dataset file replacing the bundled catalog.
    pub catalog: Option<String>,
    /// Turntable subject to show first.
    pub subject: Option<String>,
}
