// SPDX-License-Identifier: MPL-2.0
//! Writes the session state when the user changes something worth keeping.

use super::persisted_state::AppState;
use crate::ui::notifications::{Manager, Notification};

/// Saves `state`, surfacing failures as a warning toast.
///
/// Skipped under test so unit tests never touch the real data directory.
pub fn persist_state(state: &AppState, notifications: &mut Manager) {
    if cfg!(test) {
        return;
    }
    if let Some(key) = state.save() {
        notifications.push(Notification::warning(key));
    }
}
