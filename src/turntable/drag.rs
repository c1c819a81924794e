// SPDX-License-Identifier: MPL-2.0
//! Drag-to-scrub state
//!
//! Converts horizontal pointer movement into whole-frame steps. The anchor
//! advances only by the pixels consumed by whole frames, so slow drags still
//! accumulate into steps.

use iced::Point;

/// Manages scrub drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer X that frame steps are measured from
    pub anchor_x: Option<f32>,
}

impl DragState {
    /// Starts a drag operation at the pointer position
    pub fn start(&mut self, position: Point) {
        self.is_dragging = true;
        self.anchor_x = Some(position.x);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.anchor_x = None;
    }

    /// Returns the signed number of whole frames the pointer moved since the
    /// anchor and advances the anchor by the consumed distance.
    ///
    /// Moving right yields positive steps. Truncates toward zero.
    pub fn consume_frames(&mut self, position: Point, sensitivity: f32) -> i64 {
        if !self.is_dragging || sensitivity <= 0.0 {
            return 0;
        }
        let Some(anchor) = self.anchor_x else {
            return 0;
        };

        let frames = ((position.x - anchor) / sensitivity).trunc();
        if frames != 0.0 {
            self.anchor_x = Some(anchor + frames * sensitivity);
        }
        frames as i64
    }
}
