//! Sprite and font content seam.
//!
//! The host owns textures and fonts; entities only ask for ordered frame
//! sequences by animation set and for raw sprite dimensions. A missing
//! font is logged and disables overlays, it never fails the process.

use crate::animation::SpriteFrame;
use corvid_common::CorvidResult;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Named animation sets the NPC entities use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationSet {
    /// Perched idle loop
    RavenIdle,
    /// Wing-flap flight loop
    RavenFly,
    /// Single blink frame, also the source of the raven's bounding size
    RavenBlink,
    /// Player standing pose, used by ghost players at rest
    PlayerIdle,
    /// Player mid-jump pose, used by ghost players in motion
    PlayerJump,
}

/// Content provider seam, implemented by the host's asset pipeline.
pub trait ContentProvider {
    /// Returns the ordered frame sequence for an animation set.
    ///
    /// A missing or empty set is a construction-time fault for the
    /// entity requesting it.
    fn animation_frames(&self, set: AnimationSet) -> CorvidResult<Vec<SpriteFrame>>;

    /// Returns the pixel size of the set's sprite, for bounds math.
    fn sprite_size(&self, set: AnimationSet) -> Vec2;

    /// Whether the overlay font loaded.
    fn font_available(&self) -> bool;
}

/// Logs a content failure and reports whether overlays may be used.
///
/// Called once at entity construction; a missing font downgrades the
/// name/message overlays to disabled rather than failing the entity.
pub fn overlays_enabled(content: &dyn ContentProvider) -> bool {
    if content.font_available() {
        true
    } else {
        error!("overlay font unavailable, raven name/message overlays disabled");
        false
    }
}


#[cfg(test)]
mod tests {
    use super::stubs::StubContent;
    use super::*;

    #[test]
    fn test_missing_font_disables_overlays() {
        let content = StubContent {
            font: false,
            ..StubContent::default()
        };
        assert!(!overlays_enabled(&content));
    }

    #[test]
    fn test_available_font_enables_overlays() {
        let content = StubContent::default();
        assert!(overlays_enabled(&content));
    }
}
