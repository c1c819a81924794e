// SPDX-License-Identifier: MPL-2.0
//! Message routing and component effect handling.

use super::persistence::persist_state;
use super::{App, Message};
use crate::ui::{catalog, turntable};
use iced::Task;

impl App {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Catalog(message) => self.handle_catalog(message),
            Message::Turntable(message) => self.handle_turntable(message),
            Message::Notification(message) => {
                self.notifications.handle_message(message);
                Task::none()
            }
        }
    }

    fn handle_catalog(&mut self, message: catalog::Message) -> Task<Message> {
        match self.catalog.handle_message(message) {
            catalog::Effect::None => Task::none(),
            catalog::Effect::SortChanged(sort) => {
                self.app_state.last_sort = sort;
                persist_state(&self.app_state, &mut self.notifications);
                Task::none()
            }
            catalog::Effect::ShowSubject(subject) => {
                if self.turntable.turntable().subject() == Some(subject.as_str()) {
                    return Task::none();
                }
                self.handle_turntable(turntable::Message::SelectSubject(subject))
            }
        }
    }

    fn handle_turntable(&mut self, message: turntable::Message) -> Task<Message> {
        let (effect, task) = self.turntable.handle_message(message);
        match effect {
            turntable::Effect::None => {}
            turntable::Effect::SubjectChanged(subject) => {
                self.app_state.last_subject = Some(subject);
                persist_state(&self.app_state, &mut self.notifications);
            }
            turntable::Effect::MagnifierToggled(enabled) => {
                self.app_state.magnifier_enabled = Some(enabled);
                persist_state(&self.app_state, &mut self.notifications);
            }
        }
        task.map(Message::Turntable)
    }
}
