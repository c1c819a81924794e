// SPDX-License-Identifier: MPL-2.0
//! Default values and bounds for every configurable setting.
//!
//! Values read from `settings.toml` are clamped to these bounds on use, so a
//! hand-edited file can never put the turntable in an unusable state.

// ==========================================================================
// Frame Discovery
// ==========================================================================

/// Highest frame index probed per subject.
pub const DEFAULT_FRAME_LIMIT: usize = 25;
pub const MIN_FRAME_LIMIT: usize = 1;
pub const MAX_FRAME_LIMIT: usize = 360;

pub const DEFAULT_FILE_PREFIX: &str = "img";
pub const DEFAULT_FILE_EXTENSION: &str = "jpg";

/// Zero-padded width of the frame index in file names.
pub const DEFAULT_INDEX_WIDTH: usize = 2;
pub const MIN_INDEX_WIDTH: usize = 1;
pub const MAX_INDEX_WIDTH: usize = 6;

// ==========================================================================
// Playback
// ==========================================================================

/// Autoplay tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;
pub const MIN_TICK_INTERVAL_MS: u64 = 16;
pub const MAX_TICK_INTERVAL_MS: u64 = 5_000;

/// Horizontal pointer pixels per frame while dragging.
pub const DEFAULT_DRAG_SENSITIVITY_PX: f32 = 5.0;
pub const MIN_DRAG_SENSITIVITY_PX: f32 = 1.0;
pub const MAX_DRAG_SENSITIVITY_PX: f32 = 100.0;

pub const DEFAULT_AUTOPLAY: bool = true;

/// Angle covered by the rotation indicator across the whole sequence.
pub const DEFAULT_ROTATION_SPAN_DEGREES: f32 = 90.0;
pub const MIN_ROTATION_SPAN_DEGREES: f32 = 0.0;
pub const MAX_ROTATION_SPAN_DEGREES: f32 = 360.0;

// ==========================================================================
// Magnifier
// ==========================================================================

pub const DEFAULT_MAGNIFIER_ENABLED: bool = true;

pub const DEFAULT_MAGNIFIER_DIAMETER_PX: f32 = 150.0;
pub const MIN_MAGNIFIER_DIAMETER_PX: f32 = 50.0;
pub const MAX_MAGNIFIER_DIAMETER_PX: f32 = 400.0;

pub const DEFAULT_MAGNIFIER_ZOOM: f32 = 2.0;
pub const MIN_MAGNIFIER_ZOOM: f32 = 1.0;
pub const MAX_MAGNIFIER_ZOOM: f32 = 8.0;

// ==========================================================================
// Subjects
// ==========================================================================

/// Built-in subjects as `(id, label, location)`. Relative locations resolve
/// against the data directory.
pub const DEFAULT_SUBJECTS: [(&str, &str, &str); 2] = [
    ("porsche", "Porsche", "turntable/porsche"),
    ("jobs", "Jobs", "turntable/jobs"),
];

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_FRAME_LIMIT > 0);
    assert!(DEFAULT_FRAME_LIMIT >= MIN_FRAME_LIMIT);
    assert!(DEFAULT_FRAME_LIMIT <= MAX_FRAME_LIMIT);

    assert!(MIN_INDEX_WIDTH > 0);
    assert!(DEFAULT_INDEX_WIDTH >= MIN_INDEX_WIDTH);
    assert!(DEFAULT_INDEX_WIDTH <= MAX_INDEX_WIDTH);

    assert!(MIN_TICK_INTERVAL_MS > 0);
    assert!(DEFAULT_TICK_INTERVAL_MS >= MIN_TICK_INTERVAL_MS);
    assert!(DEFAULT_TICK_INTERVAL_MS <= MAX_TICK_INTERVAL_MS);

    assert!(MIN_DRAG_SENSITIVITY_PX > 0.0);
    assert!(DEFAULT_DRAG_SENSITIVITY_PX >= MIN_DRAG_SENSITIVITY_PX);
    assert!(DEFAULT_DRAG_SENSITIVITY_PX <= MAX_DRAG_SENSITIVITY_PX);

    assert!(DEFAULT_ROTATION_SPAN_DEGREES >= MIN_ROTATION_SPAN_DEGREES);
    assert!(DEFAULT_ROTATION_SPAN_DEGREES <= MAX_ROTATION_SPAN_DEGREES);

    assert!(MIN_MAGNIFIER_DIAMETER_PX > 0.0);
    assert!(DEFAULT_MAGNIFIER_DIAMETER_PX >= MIN_MAGNIFIER_DIAMETER_PX);
    assert!(DEFAULT_MAGNIFIER_DIAMETER_PX <= MAX_MAGNIFIER_DIAMETER_PX);

    assert!(MIN_MAGNIFIER_ZOOM >= 1.0);
    assert!(DEFAULT_MAGNIFIER_ZOOM >= MIN_MAGNIFIER_ZOOM);
    assert!(DEFAULT_MAGNIFIER_ZOOM <= MAX_MAGNIFIER_ZOOM);
};
