// SPDX-License-Identifier: MPL-2.0
//! Image-sequence turntable: frame discovery, playback, scrubbing and
//! magnification.

pub mod drag;
pub mod frame_source;
pub mod magnifier;
pub mod playback;

pub use frame_source::{
    load_sequence, Frame, FrameLocation, FramePixels, FrameSequence, FrameTemplate, LoadError,
    Subject, SubjectRoot,
};
pub use magnifier::{Lens, Magnifier, MagnifierSettings};
pub use playback::{Direction, LoadRequest, Phase, PlaybackSettings, Turntable};
