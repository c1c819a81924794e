// SPDX-License-Identifier: MPL-2.0
//! Circular arc paths shared by the canvas widgets.

use iced::widget::canvas::{path, Path};
use iced::Point;

const SEGMENTS_PER_TURN: f32 = 60.0;

/// Builds an arc around `center` from `start` sweeping `sweep` radians
/// clockwise, approximated with line segments.
#[must_use]
pub fn path(center: Point, radius: f32, start: f32, sweep: f32) -> Path {
    let point_at = |angle: f32| {
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segments = ((sweep.abs() / std::f32::consts::TAU) * SEGMENTS_PER_TURN)
        .ceil()
        .max(1.0) as u32;

    let mut builder = path::Builder::new();
    builder.move_to(point_at(start));
    for i in 1..=segments {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f32 / segments as f32;
        builder.line_to(point_at(start + sweep * t));
    }
    builder.build()
}
