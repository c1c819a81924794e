// SPDX-License-Identifier: MPL-2.0
//! Turntable viewer component.
//!
//! Wraps the [`Turntable`] state machine and the [`Magnifier`] with the Iced
//! plumbing: pointer events from a `mouse_area`, the autoplay tick, the
//! async frame load and the rendering of every phase.

use crate::config::Config;
use crate::i18n::{FluentArgs, I18n};
use crate::turntable::{
    load_sequence, FrameSequence, FrameTemplate, LoadError, Magnifier, Phase, Subject, Turntable,
};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{animated_spinner, AnimatedSpinner};
use iced::widget::{
    button, image, mouse_area, responsive, text, Column, Container, Row, Stack, Text,
};
use iced::{
    alignment, mouse, ContentFit, Element, Length, Padding, Point, Size, Subscription, Task,
};
use std::time::Duration;

/// Spinner animation rate while loading.
const SPINNER_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub enum Message {
    SelectSubject(String),
    Retry,
    TogglePlayback,
    ToggleMagnifier,
    Tick,
    SpinnerTick,
    Loaded {
        generation: u64,
        result: Result<FrameSequence, LoadError>,
    },
    PointerPressed,
    PointerMoved { position: Point, viewport: Size },
    PointerReleased,
    PointerLeft,
}

/// Side effects the application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A different subject was selected; remember it.
    SubjectChanged(String),
    /// The magnifier was switched on or off; remember it.
    MagnifierToggled(bool),
}

/// Visible part of the lens, positioned in stage coordinates.
#[derive(Debug, Clone)]
struct LensView {
    origin: Point,
    size: Size,
    handle: image::Handle,
}

#[derive(Debug)]
pub struct State {
    turntable: Turntable,
    magnifier: Magnifier,
    subjects: Vec<Subject>,
    template: FrameTemplate,
    frame_limit: usize,
    tick_interval: Duration,
    pointer: Option<Point>,
    viewport: Size,
    lens: Option<LensView>,
    spinner_rotation: f32,
}

impl State {
    #[must_use]
    pub fn new(config: &Config, subjects: Vec<Subject>, magnifier_enabled: bool) -> Self {
        Self {
            turntable: Turntable::new(config.turntable.playback_settings()),
            magnifier: Magnifier::new(magnifier_enabled, config.magnifier.settings()),
            subjects,
            template: config.turntable.frame_template(),
            frame_limit: config.turntable.frame_limit(),
            tick_interval: config.turntable.tick_interval(),
            pointer: None,
            viewport: Size::ZERO,
            lens: None,
            spinner_rotation: 0.0,
        }
    }

    #[must_use]
    pub fn turntable(&self) -> &Turntable {
        &self.turntable
    }

    #[must_use]
    pub fn magnifier(&self) -> &Magnifier {
        &self.magnifier
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    #[must_use]
    pub fn has_subject(&self, id: &str) -> bool {
        self.subjects.iter().any(|subject| subject.id == id)
    }

    /// Starts loading `id`; unknown ids are ignored.
    pub fn select_subject(&mut self, id: &str) -> Task<Message> {
        let Some(subject) = self.subjects.iter().find(|s| s.id == id).cloned() else {
            tracing::warn!(subject = id, "unknown turntable subject");
            return Task::none();
        };

        self.lens = None;
        self.spinner_rotation = 0.0;
        let request = self.turntable.select_subject(&subject.id);
        let generation = request.generation;
        Task::perform(
            load_sequence(subject, self.template.clone(), self.frame_limit),
            move |result| Message::Loaded { generation, result },
        )
    }

    /// Autoplay tick while playing, spinner tick while loading.
    pub fn subscription(&self) -> Subscription<Message> {
        let playback = if self.turntable.phase().is_playing() {
            iced::time::every(self.tick_interval).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };

        let spinner = if self.turntable.phase() == Phase::Loading {
            iced::time::every(SPINNER_INTERVAL).map(|_| Message::SpinnerTick)
        } else {
            Subscription::none()
        };

        Subscription::batch([playback, spinner])
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::SelectSubject(id) => {
                if self.turntable.subject() == Some(id.as_str()) {
                    return (Effect::None, Task::none());
                }
                let task = self.select_subject(&id);
                let effect = if self.has_subject(&id) {
                    Effect::SubjectChanged(id)
                } else {
                    Effect::None
                };
                (effect, task)
            }
            Message::Retry => {
                let task = match self.turntable.subject().map(str::to_owned) {
                    Some(id) => self.select_subject(&id),
                    None => Task::none(),
                };
                (Effect::None, task)
            }
            Message::TogglePlayback => {
                self.turntable.toggle_playback();
                (Effect::None, Task::none())
            }
            Message::ToggleMagnifier => {
                self.magnifier.toggle();
                self.refresh_lens();
                (
                    Effect::MagnifierToggled(self.magnifier.is_enabled()),
                    Task::none(),
                )
            }
            Message::Tick => {
                let before = self.turntable.cursor();
                self.turntable.tick();
                if self.turntable.cursor() != before {
                    self.refresh_lens();
                }
                (Effect::None, Task::none())
            }
            Message::SpinnerTick => {
                self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
                (Effect::None, Task::none())
            }
            Message::Loaded { generation, result } => {
                if self.turntable.finish_load(generation, result) {
                    self.refresh_lens();
                }
                (Effect::None, Task::none())
            }
            Message::PointerPressed => {
                if let Some(position) = self.pointer {
                    self.turntable.drag_start(position);
                }
                (Effect::None, Task::none())
            }
            Message::PointerMoved { position, viewport } => {
                self.pointer = Some(position);
                self.viewport = viewport;
                self.magnifier.pointer_moved(position);
                self.turntable.drag_move(position);
                self.refresh_lens();
                (Effect::None, Task::none())
            }
            Message::PointerReleased => {
                self.turntable.drag_end();
                (Effect::None, Task::none())
            }
            Message::PointerLeft => {
                self.pointer = None;
                self.turntable.drag_end();
                self.magnifier.pointer_left();
                self.lens = None;
                (Effect::None, Task::none())
            }
        }
    }

    fn refresh_lens(&mut self) {
        self.lens = self.turntable.current_frame().and_then(|frame| {
            let lens = self.magnifier.lens(&frame.pixels()?, self.viewport)?;
            let (width, height) = lens.pixels.dimensions();
            Some(LensView {
                origin: lens.origin,
                size: Size::new(width as f32, height as f32),
                handle: image::Handle::from_rgba(width, height, lens.pixels.into_raw()),
            })
        });
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        Column::new()
            .spacing(spacing::SM)
            .push(self.view_controls(i18n))
            .push(
                Container::new(self.view_stage(i18n))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(styles::container::stage),
            )
            .push(self.view_status(i18n))
            .height(Length::Fill)
            .into()
    }

    fn view_controls<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let current = self.turntable.subject();
        let subjects = self.subjects.iter().fold(
            Row::new().spacing(spacing::XS),
            |row, subject| {
                row.push(
                    button(text(subject.label.as_str()).size(typography::BODY))
                        .on_press(Message::SelectSubject(subject.id.clone()))
                        .padding([spacing::XXS, spacing::SM])
                        .style(styles::button::toggle(current == Some(subject.id.as_str()))),
                )
            },
        );

        let phase = self.turntable.phase();
        let playback_label = if phase.is_playing() {
            i18n.tr("turntable-pause")
        } else {
            i18n.tr("turntable-play")
        };
        let mut playback = button(text(playback_label).size(typography::BODY))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::button::secondary);
        if matches!(phase, Phase::Playing | Phase::Paused) {
            playback = playback.on_press(Message::TogglePlayback);
        }

        let magnifier = button(text(i18n.tr("turntable-magnifier")).size(typography::BODY))
            .on_press(Message::ToggleMagnifier)
            .padding([spacing::XXS, spacing::SM])
            .style(styles::button::toggle(self.magnifier.is_enabled()));

        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(subjects).width(Length::Fill))
            .push(magnifier)
            .push(playback)
            .into()
    }

    fn view_stage<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        match self.turntable.phase() {
            Phase::Loading => centered(
                Column::new()
                    .spacing(spacing::SM)
                    .align_x(alignment::Horizontal::Center)
                    .push(AnimatedSpinner::new(palette::PRIMARY_500, self.spinner_rotation).into_element())
                    .push(text(i18n.tr("turntable-loading")).size(typography::BODY)),
            ),
            Phase::Error => {
                let message = self
                    .turntable
                    .error()
                    .map(|err| i18n.tr_with_args(err.i18n_key(), &error_args(err)))
                    .unwrap_or_default();
                centered(
                    Column::new()
                        .spacing(spacing::SM)
                        .align_x(alignment::Horizontal::Center)
                        .push(
                            Text::new(message)
                                .size(typography::BODY)
                                .color(palette::ERROR_500),
                        )
                        .push(
                            button(text(i18n.tr("turntable-retry")).size(typography::BODY))
                                .on_press(Message::Retry)
                                .padding([spacing::XXS, spacing::MD])
                                .style(styles::button::primary),
                        ),
                )
            }
            Phase::Empty => {
                let key = if self.turntable.subject().is_some() {
                    "turntable-empty"
                } else {
                    "turntable-no-subject"
                };
                centered(text(i18n.tr(key)).size(typography::BODY))
            }
            Phase::Playing | Phase::Paused | Phase::Dragging => self.view_frame(),
        }
    }

    fn view_frame(&self) -> Element<'_, Message> {
        let Some(frame) = self.turntable.current_frame() else {
            return centered(text(""));
        };
        let dragging = self.turntable.phase() == Phase::Dragging;

        responsive(move |viewport| {
            let mut stage = Stack::new().push(
                image(frame.handle().clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
            );

            if let Some(lens) = &self.lens {
                stage = stage.push(
                    Container::new(
                        image(lens.handle.clone())
                            .width(Length::Fixed(lens.size.width))
                            .height(Length::Fixed(lens.size.height)),
                    )
                    .padding(Padding {
                        top: lens.origin.y,
                        left: lens.origin.x,
                        ..Padding::ZERO
                    }),
                );
            }

            mouse_area(stage)
                .on_press(Message::PointerPressed)
                .on_release(Message::PointerReleased)
                .on_move(move |position| Message::PointerMoved { position, viewport })
                .on_exit(Message::PointerLeft)
                .interaction(if dragging {
                    mouse::Interaction::Grabbing
                } else {
                    mouse::Interaction::Grab
                })
                .into()
        })
        .into()
    }

    fn view_status<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let total = self.turntable.frame_count();
        if !self.turntable.phase().has_frames() || total == 0 {
            return Row::new().height(Length::Fixed(sizing::BUTTON_HEIGHT)).into();
        }

        let mut counter = FluentArgs::new();
        counter.set("current", self.turntable.cursor() + 1);
        counter.set("total", total);
        let mut rotation = FluentArgs::new();
        rotation.set("degrees", self.turntable.rotation_degrees());

        let chip = |content: String| {
            Container::new(text(content).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::container::caption_overlay)
        };

        Row::new()
            .spacing(spacing::XS)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .align_y(alignment::Vertical::Center)
            .push(chip(i18n.tr_with_args("turntable-frame-counter", &counter)))
            .push(chip(i18n.tr_with_args("turntable-rotation", &rotation)))
            .into()
    }
}

fn error_args(err: &LoadError) -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    args.set("subject", err.subject().to_string());
    if let LoadError::SubjectUnavailable { reason, .. } = err {
        args.set("reason", reason.clone());
    }
    args
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
