// SPDX-License-Identifier: MPL-2.0
//! Subscription wiring for the application.
//!
//! Every timer here is scoped: it only exists while there is something to
//! drive, so an idle window produces no events.

use super::Message;
use crate::ui::{notifications, turntable};
use iced::{time, Subscription};
use std::time::Duration;

/// Auto-dismiss check rate for toasts.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);

pub fn create(
    turntable: &turntable::State,
    notifications: &notifications::Manager,
) -> Subscription<Message> {
    let turntable = turntable.subscription().map(Message::Turntable);

    let toasts = if notifications.has_notifications() {
        time::every(NOTIFICATION_TICK).map(|_| Message::Notification(notifications::Message::Tick))
    } else {
        Subscription::none()
    };

    Subscription::batch([turntable, toasts])
}
