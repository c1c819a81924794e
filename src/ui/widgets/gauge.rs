// SPDX-License-Identifier: MPL-2.0
//! Circular progress gauge and horizontal comparison bar for variant metrics.

use super::arc;
use crate::ui::design_tokens::{opacity, radius, sizing, typography};
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::widget::{container, text, Container, Row, Stack};
use iced::{
    alignment, mouse, Background, Border, Color, Element, Length, Rectangle, Renderer, Theme,
};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Ring filled clockwise from twelve o'clock by `fraction` of a turn.
struct Ring {
    cache: Cache,
    fraction: f32,
    color: Color,
}

impl<Message> canvas::Program<Message> for Ring {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let track = theme.extended_palette().background.strong.color;
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let ring_radius =
                    frame.width().min(frame.height()) / 2.0 - sizing::GAUGE_STROKE / 2.0;

                frame.stroke(
                    &Path::circle(center, ring_radius),
                    Stroke::default()
                        .with_width(sizing::GAUGE_STROKE)
                        .with_color(track),
                );

                if self.fraction > 0.0 {
                    frame.stroke(
                        &arc::path(center, ring_radius, -FRAC_PI_2, self.fraction * TAU),
                        Stroke::default()
                            .with_width(sizing::GAUGE_STROKE)
                            .with_color(self.color)
                            .with_line_cap(canvas::LineCap::Round),
                    );
                }
            });

        vec![geometry]
    }
}

/// Clamps `value / max` into `[0, 1]`; a non-positive `max` yields 0.
#[must_use]
pub fn fraction(value: f32, max: f32) -> f32 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// Circular gauge with the formatted value centered inside.
pub fn metric_gauge<'a, Message: 'a>(
    value: f32,
    max: f32,
    label: String,
    color: Color,
) -> Element<'a, Message> {
    let ring = Canvas::new(Ring {
        cache: Cache::default(),
        fraction: fraction(value, max),
        color,
    })
    .width(Length::Fixed(sizing::GAUGE_SIZE))
    .height(Length::Fixed(sizing::GAUGE_SIZE));

    let caption = Container::new(text(label).size(typography::CAPTION))
        .width(Length::Fixed(sizing::GAUGE_SIZE))
        .height(Length::Fixed(sizing::GAUGE_SIZE))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    Stack::new().push(ring).push(caption).into()
}

/// Thin horizontal bar filled proportionally to `value / max`.
pub fn comparison_bar<'a, Message: 'a>(value: f32, max: f32, color: Color) -> Element<'a, Message> {
    // Thousandths keep the portions within u16.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (fraction(value, max) * 1000.0).round() as u16;
    let rest = 1000 - filled;

    let segment = move |portion: u16, fill: Color| {
        Container::new(text(""))
            .width(Length::FillPortion(portion))
            .height(Length::Fixed(sizing::BAR_HEIGHT))
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(fill)),
                border: Border {
                    radius: radius::FULL.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            })
    };

    let mut bar = Row::new().width(Length::Fill);
    if filled > 0 {
        bar = bar.push(segment(filled, color));
    }
    if rest > 0 {
        bar = bar.push(segment(
            rest,
            Color {
                a: opacity::OVERLAY_SUBTLE,
                ..color
            },
        ));
    }
    bar.into()
}
