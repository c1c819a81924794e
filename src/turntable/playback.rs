// SPDX-License-Identifier: MPL-2.0
//! Turntable playback state machine.
//!
//! Owns the loaded frame sequence, the playback cursor, the autoplay
//! direction and the load generation. Every mutation goes through a method
//! here; the UI only forwards events.

use super::drag::DragState;
use super::frame_source::{Frame, FrameSequence, LoadError};
use iced::Point;

/// Current phase of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No subject loaded, or the subject has no frames.
    #[default]
    Empty,
    /// Frames are being discovered and decoded.
    Loading,
    /// The last load failed.
    Error,
    /// Autoplay is advancing the cursor.
    Playing,
    /// Cursor is still; autoplay is suspended.
    Paused,
    /// The user is scrubbing with the pointer.
    Dragging,
}

impl Phase {
    /// Returns true if a frame can be shown.
    #[must_use]
    pub fn has_frames(self) -> bool {
        matches!(self, Self::Playing | Self::Paused | Self::Dragging)
    }

    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Autoplay direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[must_use]
    pub fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Tunables read from the `[turntable]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Start in `Playing` after a successful load.
    pub autoplay: bool,
    /// Horizontal pixels per frame while dragging.
    pub drag_sensitivity: f32,
    /// Total angle covered by the indicator, in degrees.
    pub rotation_span: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            drag_sensitivity: 5.0,
            rotation_span: 90.0,
        }
    }
}

/// A load the caller must perform, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub subject: String,
}

#[derive(Debug, Clone, Default)]
pub struct Turntable {
    phase: Phase,
    subject: Option<String>,
    sequence: Option<FrameSequence>,
    error: Option<LoadError>,
    cursor: usize,
    direction: Direction,
    generation: u64,
    drag: DragState,
    settings: PlaybackSettings,
}

impl Turntable {
    #[must_use]
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Switches to a subject: discards the current sequence, resets the
    /// cursor and returns the load to perform.
    pub fn select_subject(&mut self, subject: &str) -> LoadRequest {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Loading;
        self.subject = Some(subject.to_string());
        self.sequence = None;
        self.error = None;
        self.cursor = 0;
        self.direction = Direction::Forward;
        self.drag.stop();

        tracing::debug!(subject, generation = self.generation, "turntable loading");
        LoadRequest {
            generation: self.generation,
            subject: subject.to_string(),
        }
    }

    /// Applies a load result. Returns `false` if the result is stale.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<FrameSequence, LoadError>,
    ) -> bool {
        if generation != self.generation || self.phase != Phase::Loading {
            tracing::debug!(
                generation,
                current = self.generation,
                "ignoring stale frame sequence"
            );
            return false;
        }

        match result {
            Ok(sequence) if sequence.is_empty() => {
                self.phase = Phase::Empty;
                self.sequence = None;
            }
            Ok(sequence) => {
                self.phase = if self.settings.autoplay {
                    Phase::Playing
                } else {
                    Phase::Paused
                };
                self.sequence = Some(sequence);
            }
            Err(err) => {
                tracing::warn!(%err, "turntable load failed");
                self.phase = Phase::Error;
                self.error = Some(err);
            }
        }
        self.cursor = 0;
        self.direction = Direction::Forward;
        true
    }

    /// Advances autoplay by one frame, bouncing at either end.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let len = self.frame_count();
        if len == 0 {
            return;
        }

        let next = self.cursor as i64 + self.direction.step();
        if next < 0 || next >= len as i64 {
            self.direction = self.direction.reversed();
        } else {
            self.cursor = next as usize;
        }
    }

    /// Toggles between `Playing` and `Paused`; no-op in other phases.
    pub fn toggle_playback(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    pub fn drag_start(&mut self, position: Point) {
        if matches!(self.phase, Phase::Playing | Phase::Paused) && self.frame_count() > 0 {
            self.phase = Phase::Dragging;
            self.drag.start(position);
        }
    }

    /// Scrubs by the whole frames covered since the last consumed sample.
    pub fn drag_move(&mut self, position: Point) {
        if self.phase != Phase::Dragging {
            return;
        }
        let frames = self
            .drag
            .consume_frames(position, self.settings.drag_sensitivity);
        if frames != 0 {
            let last = self.frame_count().saturating_sub(1) as i64;
            self.cursor = (self.cursor as i64 + frames).clamp(0, last) as usize;
        }
    }

    /// Ends a drag on pointer-up or when the pointer leaves the image.
    pub fn drag_end(&mut self) {
        if self.phase == Phase::Dragging {
            self.drag.stop();
            self.phase = Phase::Paused;
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.sequence.as_ref().map_or(0, FrameSequence::len)
    }

    /// Frame under the cursor, only while a frame can be shown.
    #[must_use]
    pub fn current_frame(&self) -> Option<&Frame> {
        if !self.phase.has_frames() {
            return None;
        }
        self.sequence.as_ref()?.get(self.cursor)
    }

    /// Indicator angle in whole degrees, centered on zero.
    #[must_use]
    pub fn rotation_degrees(&self) -> i32 {
        let len = self.frame_count();
        if len <= 1 {
            return 0;
        }
        let progress = self.cursor as f32 / (len - 1) as f32;
        ((progress - 0.5) * self.settings.rotation_span).round() as i32
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::turntable::frame_source::FrameLocation;
    use image_rs::RgbaImage;
    use std::path::PathBuf;

    pub(crate) fn sequence(len: usize) -> FrameSequence {
        let frames = (1..=len)
            .map(|i| {
                Frame::new(
                    i,
                    FrameLocation::File(PathBuf::from(format!("img{i:02}.jpg"))),
                    RgbaImage::new(2, 2),
                )
            })
            .collect();
        FrameSequence::new("demo", frames)
    }

    fn loaded(len: usize) -> Turntable {
        let mut turntable = Turntable::new(PlaybackSettings::default());
        let request = turntable.select_subject("demo");
        assert!(turntable.finish_load(request.generation, Ok(sequence(len))));
        turntable
    }

    #[test]
    fn starts_empty() {
        let turntable = Turntable::default();
        assert_eq!(turntable.phase(), Phase::Empty);
        assert!(turntable.current_frame().is_none());
    }

    #[test]
    fn successful_load_starts_playing_at_zero() {
        let turntable = loaded(5);
        assert_eq!(turntable.phase(), Phase::Playing);
        assert_eq!(turntable.cursor(), 0);
        assert_eq!(turntable.direction(), Direction::Forward);
        assert_eq!(turntable.current_frame().map(|f| f.index), Some(1));
    }

    #[test]
    fn autoplay_off_loads_paused() {
        let mut turntable = Turntable::new(PlaybackSettings {
            autoplay: false,
            ..PlaybackSettings::default()
        });
        let request = turntable.select_subject("demo");
        turntable.finish_load(request.generation, Ok(sequence(3)));
        assert_eq!(turntable.phase(), Phase::Paused);
    }

    #[test]
    fn empty_sequence_enters_empty_phase() {
        let mut turntable = Turntable::default();
        let request = turntable.select_subject("demo");
        turntable.finish_load(request.generation, Ok(FrameSequence::empty("demo")));
        assert_eq!(turntable.phase(), Phase::Empty);
        assert!(turntable.current_frame().is_none());
    }

    #[test]
    fn failed_load_enters_error_phase() {
        let mut turntable = Turntable::default();
        let request = turntable.select_subject("demo");
        let err = LoadError::NoDecodableFrames {
            subject: "demo".into(),
        };
        turntable.finish_load(request.generation, Err(err.clone()));
        assert_eq!(turntable.phase(), Phase::Error);
        assert_eq!(turntable.error(), Some(&err));
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut turntable = Turntable::default();
        let first = turntable.select_subject("porsche");
        let second = turntable.select_subject("jobs");

        assert!(!turntable.finish_load(first.generation, Ok(sequence(4))));
        assert_eq!(turntable.phase(), Phase::Loading);

        assert!(turntable.finish_load(second.generation, Ok(sequence(2))));
        assert_eq!(turntable.frame_count(), 2);
        assert_eq!(turntable.subject(), Some("jobs"));
    }

    #[test]
    fn tick_bounces_at_the_end() {
        let mut turntable = loaded(10);
        for _ in 0..9 {
            turntable.tick();
        }
        assert_eq!(turntable.cursor(), 9);
        assert_eq!(turntable.direction(), Direction::Forward);

        turntable.tick();
        assert_eq!(turntable.cursor(), 9);
        assert_eq!(turntable.direction(), Direction::Backward);

        turntable.tick();
        assert_eq!(turntable.cursor(), 8);
    }

    #[test]
    fn full_bounce_cycle_never_skips_or_overshoots() {
        let mut turntable = loaded(4);
        let mut visited = vec![turntable.cursor()];
        for _ in 0..8 {
            turntable.tick();
            visited.push(turntable.cursor());
        }
        assert_eq!(visited, [0, 1, 2, 3, 3, 2, 1, 0, 0]);
    }

    #[test]
    fn single_frame_stays_and_flips() {
        let mut turntable = loaded(1);
        turntable.tick();
        assert_eq!(turntable.cursor(), 0);
        assert_eq!(turntable.direction(), Direction::Backward);
        turntable.tick();
        assert_eq!(turntable.cursor(), 0);
        assert_eq!(turntable.direction(), Direction::Forward);
    }

    #[test]
    fn tick_is_ignored_unless_playing() {
        let mut turntable = loaded(5);
        turntable.toggle_playback();
        assert_eq!(turntable.phase(), Phase::Paused);
        turntable.tick();
        assert_eq!(turntable.cursor(), 0);

        turntable.toggle_playback();
        assert_eq!(turntable.phase(), Phase::Playing);
        turntable.tick();
        assert_eq!(turntable.cursor(), 1);
    }

    #[test]
    fn toggle_is_noop_while_loading() {
        let mut turntable = Turntable::default();
        turntable.select_subject("demo");
        turntable.toggle_playback();
        assert_eq!(turntable.phase(), Phase::Loading);
    }

    #[test]
    fn drag_scrubs_and_ends_paused() {
        let mut turntable = loaded(10);
        turntable.drag_start(Point::new(100.0, 20.0));
        assert_eq!(turntable.phase(), Phase::Dragging);

        turntable.tick();
        assert_eq!(turntable.cursor(), 0);

        turntable.drag_move(Point::new(117.0, 20.0));
        assert_eq!(turntable.cursor(), 3);
        turntable.drag_move(Point::new(120.0, 20.0));
        assert_eq!(turntable.cursor(), 4);

        turntable.drag_end();
        assert_eq!(turntable.phase(), Phase::Paused);
        assert_eq!(turntable.direction(), Direction::Forward);
    }

    #[test]
    fn drag_clamps_to_sequence_bounds() {
        let mut turntable = loaded(5);
        turntable.drag_start(Point::new(0.0, 0.0));
        turntable.drag_move(Point::new(-200.0, 0.0));
        assert_eq!(turntable.cursor(), 0);
        turntable.drag_move(Point::new(500.0, 0.0));
        assert_eq!(turntable.cursor(), 4);
    }

    #[test]
    fn drag_is_monotonic_in_displacement() {
        let mut turntable = loaded(25);
        turntable.drag_start(Point::new(0.0, 0.0));
        let mut last = turntable.cursor();
        for x in (0..120).step_by(3) {
            turntable.drag_move(Point::new(x as f32, 0.0));
            assert!(turntable.cursor() >= last);
            last = turntable.cursor();
        }
        assert_eq!(last, 23);
    }

    #[test]
    fn drag_does_not_start_without_frames() {
        let mut turntable = Turntable::default();
        turntable.drag_start(Point::new(0.0, 0.0));
        assert_eq!(turntable.phase(), Phase::Empty);
    }

    #[test]
    fn switching_subject_resets_state() {
        let mut turntable = loaded(10);
        turntable.tick();
        turntable.tick();
        let before = turntable.generation();

        turntable.select_subject("jobs");
        assert_eq!(turntable.phase(), Phase::Loading);
        assert_eq!(turntable.cursor(), 0);
        assert_eq!(turntable.frame_count(), 0);
        assert_eq!(turntable.generation(), before + 1);
    }

    #[test]
    fn rotation_indicator_spans_configured_angle() {
        let mut turntable = loaded(25);
        assert_eq!(turntable.rotation_degrees(), -45);
        for _ in 0..12 {
            turntable.tick();
        }
        assert_eq!(turntable.rotation_degrees(), 0);
        for _ in 0..12 {
            turntable.tick();
        }
        assert_eq!(turntable.rotation_degrees(), 45);

        assert_eq!(loaded(1).rotation_degrees(), 0);
    }
}
