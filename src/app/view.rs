// SPDX-License-Identifier: MPL-2.0
//! Root layout: catalog on the left, turntable on the right, toasts on top.

use super::{App, Message};
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{container, text, Column, Container, Row, Stack};
use iced::{Element, Length, Theme};

impl App {
    pub(super) fn view(&self) -> Element<'_, Message> {
        let header = text(self.i18n.tr("window-title")).size(typography::TITLE_LG);

        let catalog = Container::new(self.catalog.view(&self.i18n).map(Message::Catalog))
            .width(Length::FillPortion(3))
            .height(Length::Fill);

        let turntable = Container::new(self.turntable.view(&self.i18n).map(Message::Turntable))
            .width(Length::FillPortion(2))
            .height(Length::Fill)
            .max_height(sizing::TURNTABLE_MAX_HEIGHT);

        let content = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(header)
            .push(
                Row::new()
                    .spacing(spacing::LG)
                    .push(catalog)
                    .push(turntable)
                    .height(Length::Fill),
            );

        let background = Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|theme: &Theme| container::Style {
                background: Some(theme.extended_palette().background.base.color.into()),
                ..container::Style::default()
            });

        Stack::new()
            .push(background)
            .push(self.notifications.view(&self.i18n).map(Message::Notification))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
