//! Text overlay seam and layout helpers.
//!
//! Overlays are screen-space text labels (a raven's name, the message it
//! delivers) owned by whichever entity created them and destroyed within
//! that entity's lifecycle. The provider is implemented by the host.

use corvid_common::OverlayId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color for overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl OverlayColor {
    /// Opaque white, the default message color.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a color from raw channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// How overlay text is anchored to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayAnchor {
    /// Position is the center of the rendered text
    #[default]
    Center,
}

/// Text overlay provider seam, implemented by the host renderer.
pub trait OverlayProvider {
    /// Creates a label at a screen-space position; returns its handle.
    fn create(
        &mut self,
        text: &str,
        screen_pos: Vec2,
        color: OverlayColor,
        anchor: OverlayAnchor,
    ) -> OverlayId;

    /// Moves an existing label.
    fn set_position(&mut self, overlay: OverlayId, screen_pos: Vec2);

    /// Destroys a label. Destroying an unknown handle is a no-op.
    fn destroy(&mut self, overlay: OverlayId);

    /// Returns the rendered pixel size of `text`, for layout math.
    fn measure(&self, text: &str) -> Vec2;
}

/// Clamps a center-anchored message's x position so it stays on screen.
///
/// The right-edge clamp is applied first and the left-edge clamp second,
/// so for text wider than the screen the left edge wins: it always ends
/// up on screen even when the right edge cannot.
#[must_use]
pub fn clamp_message_x(center_x: f32, text_width: f32, screen_width: f32) -> f32 {
    let mut x = center_x;
    let right = x + text_width / 2.0;
    if right > screen_width {
        x -= right - screen_width;
    }
    let left = x - text_width / 2.0;
    if left < 0.0 {
        x += -left;
    }
    x
}
