//! Looping sprite animation component.
//!
//! Holds an ordered sequence of sprite frames and a fixed per-frame
//! duration. The playback timer restarts lazily: elapsed time is kept
//! modulo the frame duration so arbitrarily large deltas wrap correctly.

use corvid_common::{CorvidError, CorvidResult};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An opaque drawable sprite handle plus its pixel size.
///
/// The actual texture lives with the host renderer; entities only carry
/// the handle through to the draw seam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    /// Renderer-side sprite handle
    pub sprite_id: u32,
    /// Frame size in pixels
    pub size: Vec2,
}

impl SpriteFrame {
    /// Creates a new sprite frame.
    #[must_use]
    pub const fn new(sprite_id: u32, size: Vec2) -> Self {
        Self { sprite_id, size }
    }
}

/// An infinitely looping, restartable animation over a frame sequence.
#[derive(Debug, Clone)]
pub struct LoopingAnimation {
    /// Ordered frame sequence
    frames: Vec<SpriteFrame>,
    /// Seconds each frame is shown for
    frame_seconds: f32,
    /// Time accumulated towards the next frame advance
    elapsed: f32,
    /// Index of the currently active frame
    index: usize,
}

impl LoopingAnimation {
    /// Creates a new looping animation.
    ///
    /// Fails fast on an empty frame sequence or a non-positive frame
    /// duration; neither is a meaningful animation.
    pub fn new(frames: Vec<SpriteFrame>, frame_seconds: f32) -> CorvidResult<Self> {
        if frames.is_empty() {
            return Err(CorvidError::InvalidAnimation("no frames"));
        }
        if frame_seconds <= 0.0 {
            return Err(CorvidError::InvalidAnimation("non-positive frame duration"));
        }
        Ok(Self {
            frames,
            frame_seconds,
            elapsed: 0.0,
            index: 0,
        })
    }

    /// Advances playback by `dt` seconds, wrapping past the last frame.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        while self.elapsed >= self.frame_seconds {
            self.elapsed -= self.frame_seconds;
            self.index = (self.index + 1) % self.frames.len();
        }
    }

    /// Returns the currently active frame without mutating playback state.
    #[must_use]
    pub fn active_frame(&self) -> &SpriteFrame {
        &self.frames[self.index]
    }

    /// Returns the index of the currently active frame.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.index
    }

    /// Resets playback to frame zero with no accumulated time.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.index = 0;
    }

    /// Returns the number of frames in the loop.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns the per-frame duration in seconds.
    #[must_use]
    pub const fn frame_seconds(&self) -> f32 {
        self.frame_seconds
    }
}
