// SPDX-License-Identifier: MPL-2.0
//! Loading spinner shown while a frame sequence is being fetched.

use super::arc;
use crate::ui::design_tokens::{opacity, sizing};
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Rectangle, Renderer, Theme};
use std::f32::consts::{FRAC_PI_2, PI};

/// Angle added on every animation step, in radians.
pub const STEP: f32 = PI / 30.0;

const STROKE_WIDTH: f32 = 3.0;

/// Half-circle arc rotated by `rotation`; the caller advances the angle.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Next spinner angle, wrapped to one turn.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + STEP) % std::f32::consts::TAU
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: opacity::OVERLAY_SUBTLE,
                        ..self.color
                    }),
                );

                // Start at twelve o'clock.
                let start = self.rotation - FRAC_PI_2;
                frame.stroke(
                    &arc::path(center, radius, start, PI),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_after_full_turn() {
        let mut rotation = 0.0;
        for _ in 0..60 {
            rotation = advance(rotation);
        }
        assert!(rotation < STEP);
    }
}
