// SPDX-License-Identifier: MPL-2.0
//! Catalog browser component: filter sidebar and variant card grid.

use crate::catalog::{
    filter, ActiveFilter, Catalog, CatalogFilter, Category, FilterKind, RefractionType,
    SortDirection, SortKey, SortSpec, Variant,
};
use crate::catalog::variant::{parse_hex, COMPLEXITY_MAX, PERCENT_MAX};
use crate::i18n::{FluentArgs, I18n};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{comparison_bar, metric_gauge};
use iced::widget::{button, pick_list, responsive, scrollable, text, Column, Container, Row};
use iced::{alignment, Color, Element, Length};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Message {
    ScopeSelected(Option<String>),
    CategorySelected(Choice<String>),
    BaseColorSelected(Choice<String>),
    RefractionSelected(Choice<RefractionType>),
    SortKeySelected(Choice<SortKey>),
    SortDirectionSelected(Choice<SortDirection>),
    RemoveFilter(FilterKind),
    ClearSort,
    ClearAll,
    SelectVariant(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The sort selection changed; remember it.
    SortChanged(Option<SortSpec>),
    /// The selected variant has a turntable subject.
    ShowSubject(String),
}

/// Pick list entry: `None` stands for "any".
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub value: Option<T>,
    label: String,
}

impl<T> Choice<T> {
    fn new(value: Option<T>, label: String) -> Self {
        Self { value, label }
    }
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug)]
pub struct State {
    catalog: Catalog,
    categories: Vec<Category>,
    /// Category page being browsed; `None` browses everything.
    scope: Option<String>,
    filter: CatalogFilter,
    selected: Option<String>,
}

impl State {
    #[must_use]
    pub fn new(catalog: Catalog, sort: Option<SortSpec>) -> Self {
        let categories = catalog.categories();
        Self {
            catalog,
            categories,
            scope: None,
            filter: CatalogFilter {
                sort,
                ..CatalogFilter::default()
            },
            selected: None,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Variants of the current scope, before filtering.
    #[must_use]
    pub fn scoped_variants(&self) -> &[Variant] {
        self.scope
            .as_ref()
            .and_then(|scope| self.categories.iter().find(|c| &c.name == scope))
            .map_or(self.catalog.variants(), |category| category.variants.as_slice())
    }

    /// Variants currently shown as cards.
    #[must_use]
    pub fn visible(&self) -> Vec<&Variant> {
        self.filter.apply(self.scoped_variants())
    }

    pub fn handle_message(&mut self, message: Message) -> Effect {
        let sort_before = self.filter.sort;

        match message {
            Message::ScopeSelected(scope) => {
                self.filter.hide_category = scope.is_some();
                self.scope = scope;
            }
            Message::CategorySelected(choice) => self.filter.category = choice.value,
            Message::BaseColorSelected(choice) => self.filter.base_color = choice.value,
            Message::RefractionSelected(choice) => self.filter.refraction_type = choice.value,
            Message::SortKeySelected(choice) => match choice.value {
                Some(key) => self.filter.set_sort_key(key),
                None => self.filter.clear_sort(),
            },
            Message::SortDirectionSelected(choice) => {
                if let Some(direction) = choice.value {
                    self.filter.set_sort_direction(direction);
                }
            }
            Message::RemoveFilter(kind) => self.filter.remove(kind),
            Message::ClearSort => self.filter.clear_sort(),
            Message::ClearAll => {
                self.filter = CatalogFilter {
                    hide_category: self.filter.hide_category,
                    ..CatalogFilter::default()
                };
            }
            Message::SelectVariant(name) => {
                let subject = self
                    .catalog
                    .find(&name)
                    .and_then(|variant| variant.subject.clone());
                tracing::debug!(variant = %name, ?subject, "variant selected");
                self.selected = Some(name);
                return subject.map_or(Effect::None, Effect::ShowSubject);
            }
        }

        if self.filter.sort == sort_before {
            Effect::None
        } else {
            Effect::SortChanged(self.filter.sort)
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let sidebar = Container::new(scrollable(self.view_filters(i18n)))
            .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
            .height(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::panel);

        let main = Column::new()
            .spacing(spacing::SM)
            .push(self.view_scopes(i18n))
            .push(self.view_summary(i18n))
            .push(self.view_grid(i18n));

        Row::new()
            .spacing(spacing::MD)
            .push(sidebar)
            .push(main.width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn view_scopes<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let all = button(text(i18n.tr("catalog-scope-all")).size(typography::BODY))
            .on_press(Message::ScopeSelected(None))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::button::toggle(self.scope.is_none()));

        self.categories
            .iter()
            .fold(Row::new().spacing(spacing::XS).push(all), |row, category| {
                let selected = self.scope.as_deref() == Some(category.name.as_str());
                row.push(
                    button(text(category.display_name.as_str()).size(typography::BODY))
                        .on_press(Message::ScopeSelected(Some(category.name.clone())))
                        .padding([spacing::XXS, spacing::SM])
                        .style(styles::button::toggle(selected)),
                )
            })
            .into()
    }

    fn view_filters<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let variants = self.scoped_variants();
        let mut column = Column::new()
            .spacing(spacing::SM)
            .push(text(i18n.tr("catalog-filters-title")).size(typography::TITLE_SM));

        if !self.filter.hide_category {
            let mut options = vec![Choice::new(None, i18n.tr("catalog-any-category"))];
            options.extend(
                filter::categories(variants)
                    .into_iter()
                    .map(|name| Choice::new(Some(name.clone()), self.catalog.display_name(&name))),
            );
            let selected = selected_choice(&options, self.filter.category.as_ref());
            column = column.push(labeled(
                i18n.tr("catalog-filter-category"),
                pick_list(options, selected, Message::CategorySelected).width(Length::Fill),
            ));
        }

        let mut colors = vec![Choice::new(None, i18n.tr("catalog-any-color"))];
        colors.extend(
            filter::base_colors(variants)
                .into_iter()
                .map(|color| Choice::new(Some(color.name.clone()), color.name)),
        );
        let selected = selected_choice(&colors, self.filter.base_color.as_ref());
        column = column.push(labeled(
            i18n.tr("catalog-filter-base-color"),
            pick_list(colors, selected, Message::BaseColorSelected).width(Length::Fill),
        ));

        let mut refraction = vec![Choice::new(None, i18n.tr("catalog-any-refraction"))];
        refraction.extend(
            RefractionType::ALL
                .into_iter()
                .map(|kind| Choice::new(Some(kind), i18n.tr(kind.i18n_key()))),
        );
        let selected = selected_choice(&refraction, self.filter.refraction_type.as_ref());
        column = column.push(labeled(
            i18n.tr("catalog-filter-refraction"),
            pick_list(refraction, selected, Message::RefractionSelected).width(Length::Fill),
        ));

        let mut keys = vec![Choice::new(None, i18n.tr("catalog-sort-none"))];
        keys.extend(
            SortKey::ALL
                .into_iter()
                .map(|key| Choice::new(Some(key), i18n.tr(key.i18n_key()))),
        );
        let sort_key = self.filter.sort.map(|sort| sort.key);
        let selected = selected_choice(&keys, sort_key.as_ref());
        column = column.push(labeled(
            i18n.tr("catalog-sort-by"),
            pick_list(keys, selected, Message::SortKeySelected).width(Length::Fill),
        ));

        if let Some(sort) = self.filter.sort {
            let directions: Vec<Choice<SortDirection>> =
                [SortDirection::Descending, SortDirection::Ascending]
                    .into_iter()
                    .map(|direction| Choice::new(Some(direction), i18n.tr(direction.i18n_key())))
                    .collect();
            let selected = selected_choice(&directions, Some(&sort.direction));
            column = column
                .push(
                    pick_list(directions, selected, Message::SortDirectionSelected)
                        .width(Length::Fill),
                )
                .push(
                    button(text(i18n.tr("catalog-clear-sort")).size(typography::BODY_SM))
                        .on_press(Message::ClearSort)
                        .style(styles::button::secondary),
                );
        }

        column.into()
    }

    fn view_summary<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let variants = self.scoped_variants();
        let mut args = FluentArgs::new();
        args.set("visible", self.visible().len());
        args.set("total", variants.len());

        let mut row = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(text(i18n.tr_with_args("catalog-count", &args)).size(typography::BODY));

        for chip in self.filter.active_filters(variants) {
            let label = match (chip.kind, self.filter.refraction_type) {
                (FilterKind::RefractionType, Some(kind)) => i18n.tr(kind.i18n_key()),
                (FilterKind::Category, _) => self.catalog.display_name(&chip.value),
                _ => chip.label.clone(),
            };
            row = row.push(filter_chip(chip, label));
        }

        if self.filter.is_active() {
            let mut active = FluentArgs::new();
            active.set("count", self.filter.active_count(variants));
            row = row.push(
                button(
                    text(i18n.tr_with_args("catalog-clear-all", &active)).size(typography::BODY_SM),
                )
                .on_press(Message::ClearAll)
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::secondary),
            );
        }

        row.wrap().into()
    }

    fn view_grid<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let visible = self.visible();
        if visible.is_empty() {
            return Container::new(text(i18n.tr("catalog-no-match")).size(typography::BODY))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into();
        }

        responsive(move |size| {
            let columns = grid_columns(size.width);
            let rows = visible.chunks(columns).map(|chunk| {
                chunk
                    .iter()
                    .fold(Row::new().spacing(spacing::MD), |row, &variant| {
                        row.push(self.view_card(variant, i18n))
                    })
                    .into()
            });
            scrollable(Column::with_children(rows).spacing(spacing::MD))
                .height(Length::Fill)
                .into()
        })
        .into()
    }

    fn view_card<'a>(&'a self, variant: &'a Variant, i18n: &'a I18n) -> Element<'a, Message> {
        let mut title = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                Container::new(text(variant.name.as_str()).size(typography::TITLE_SM))
                    .width(Length::Fill),
            );
        if variant.is_specialty() {
            title = title.push(
                Container::new(text(i18n.tr("catalog-specialty")).size(typography::CAPTION))
                    .padding([0.0, spacing::XS])
                    .style(styles::container::badge(palette::ACCENT_500)),
            );
        }

        let color = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                Container::new(text(""))
                    .width(Length::Fixed(sizing::CARD_SWATCH))
                    .height(Length::Fixed(sizing::CARD_SWATCH))
                    .style(styles::container::swatch(hex_color(&variant.base_color.hex))),
            )
            .push(text(variant.base_color.name.as_str()).size(typography::BODY_SM))
            .push(
                text(format!("· {}", i18n.tr(variant.refraction_type.i18n_key())))
                    .size(typography::BODY_SM),
            );

        let gauges = Row::new()
            .spacing(spacing::MD)
            .push(gauge_with_caption(
                metric_gauge(
                    variant.refraction_rate,
                    PERCENT_MAX,
                    format!("{:.0}", variant.refraction_rate),
                    palette::PRIMARY_500,
                ),
                i18n.tr(SortKey::RefractionRate.i18n_key()),
            ))
            .push(gauge_with_caption(
                metric_gauge(
                    variant.art_clarity,
                    PERCENT_MAX,
                    format!("{:.0}%", variant.art_clarity),
                    palette::SUCCESS_500,
                ),
                i18n.tr(SortKey::ArtClarity.i18n_key()),
            ));

        let complexity = metric_row(
            i18n.tr(SortKey::Complexity.i18n_key()),
            i18n.tr(variant.complexity_level().i18n_key()),
            comparison_bar(variant.complexity, COMPLEXITY_MAX, palette::WARNING_500),
        );
        let balance = metric_row(
            i18n.tr("metric-clean-vs-busy"),
            i18n.tr(variant.balance().i18n_key()),
            comparison_bar(variant.clean_vs_busy, PERCENT_MAX, palette::INFO_500),
        );

        let mut content = Column::new()
            .spacing(spacing::XS)
            .push(title)
            .push(
                text(self.catalog.display_name(&variant.category))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
            .push(color)
            .push(text(variant.pattern.name.as_str()).size(typography::BODY_SM));
        if !variant.pattern.description.is_empty() {
            content = content.push(
                text(variant.pattern.description.as_str())
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            );
        }
        content = content.push(gauges).push(complexity).push(balance);

        let selected = self.selected.as_deref() == Some(variant.name.as_str());
        button(content)
            .on_press(Message::SelectVariant(variant.name.clone()))
            .width(Length::Fixed(sizing::CARD_WIDTH))
            .padding(spacing::SM)
            .style(styles::button::card(selected))
            .into()
    }
}

/// Number of card columns fitting in `width`, at least one.
#[must_use]
pub fn grid_columns(width: f32) -> usize {
    let per_card = sizing::CARD_WIDTH + spacing::MD;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let columns = ((width + spacing::MD) / per_card).floor().max(1.0) as usize;
    columns
}

fn selected_choice<T: Clone + PartialEq>(
    options: &[Choice<T>],
    value: Option<&T>,
) -> Option<Choice<T>> {
    options
        .iter()
        .find(|choice| choice.value.as_ref() == value)
        .cloned()
}

fn hex_color(hex: &str) -> Color {
    parse_hex(hex).map_or(palette::GRAY_400, |(r, g, b)| Color::from_rgb8(r, g, b))
}

fn labeled<'a>(label: String, control: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(text(label).size(typography::CAPTION))
        .push(control)
        .into()
}

fn filter_chip<'a>(chip: ActiveFilter, label: String) -> Element<'a, Message> {
    let mut content = Row::new()
        .spacing(spacing::XXS)
        .align_y(alignment::Vertical::Center);
    if let Some(hex) = &chip.color {
        content = content.push(
            Container::new(text(""))
                .width(Length::Fixed(sizing::CARD_SWATCH))
                .height(Length::Fixed(sizing::CARD_SWATCH))
                .style(styles::container::swatch(hex_color(hex))),
        );
    }
    content = content
        .push(text(label).size(typography::BODY_SM))
        .push(text("×").size(typography::BODY_SM));

    button(content)
        .on_press(Message::RemoveFilter(chip.kind))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::chip)
        .into()
}

fn gauge_with_caption<'a>(
    gauge: Element<'a, Message>,
    caption: String,
) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(gauge)
        .push(text(caption).size(typography::CAPTION))
        .into()
}

fn metric_row<'a>(
    name: String,
    level: String,
    bar: Element<'a, Message>,
) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(
            Row::new()
                .push(Container::new(text(name).size(typography::CAPTION)).width(Length::Fill))
                .push(text(level).size(typography::CAPTION)),
        )
        .push(bar)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        State::new(Catalog::embedded().expect("bundled catalog"), None)
    }

    #[test]
    fn grid_always_has_a_column() {
        assert_eq!(grid_columns(0.0), 1);
        assert_eq!(grid_columns(sizing::CARD_WIDTH), 1);
        assert_eq!(grid_columns(sizing::CARD_WIDTH * 3.0 + spacing::MD * 2.0), 3);
    }

    #[test]
    fn sort_changes_are_reported() {
        let mut state = state();
        let effect = state.handle_message(Message::SortKeySelected(Choice::new(
            Some(SortKey::Complexity),
            String::new(),
        )));
        assert_eq!(
            effect,
            Effect::SortChanged(Some(SortSpec::new(
                SortKey::Complexity,
                SortDirection::Descending
            )))
        );

        let effect = state.handle_message(Message::ClearSort);
        assert_eq!(effect, Effect::SortChanged(None));

        let effect = state.handle_message(Message::ClearSort);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn scope_limits_variants_and_hides_category_filter() {
        let mut state = state();
        let total = state.scoped_variants().len();
        state.handle_message(Message::CategorySelected(Choice::new(
            Some("foil".to_string()),
            String::new(),
        )));
        state.handle_message(Message::ScopeSelected(Some("prism".to_string())));

        assert!(state.filter().hide_category);
        assert!(state.scoped_variants().len() < total);
        assert!(state.visible().iter().all(|v| v.category == "prism"));
        assert!(!state.visible().is_empty());
    }

    #[test]
    fn selecting_variant_with_subject_requests_it() {
        let mut state = state();
        let variant = state
            .scoped_variants()
            .iter()
            .find(|v| v.subject.is_some())
            .cloned()
            .expect("a variant with a subject");

        let effect = state.handle_message(Message::SelectVariant(variant.name.clone()));
        assert_eq!(effect, Effect::ShowSubject(variant.subject.unwrap_or_default()));
        assert_eq!(state.selected(), Some(variant.name.as_str()));
    }

    #[test]
    fn clear_all_keeps_scope() {
        let mut state = state();
        state.handle_message(Message::ScopeSelected(Some("holo".to_string())));
        state.handle_message(Message::RefractionSelected(Choice::new(
            Some(RefractionType::Monochrome),
            String::new(),
        )));
        state.handle_message(Message::ClearAll);

        assert!(state.filter().hide_category);
        assert!(state.filter().refraction_type.is_none());
    }

    #[test]
    fn choice_displays_label() {
        let choice = Choice::new(Some(SortKey::ArtClarity), "Art clarity".to_string());
        assert_eq!(choice.to_string(), "Art clarity");
    }
}
