//! Screen/camera projection seam.

use corvid_common::ScreenId;
use glam::Vec2;

/// Camera view seam, implemented by the host.
///
/// Maps world-space points into screen space for drawing and overlay
/// placement, and reports which screen the camera currently shows.
pub trait CameraView {
    /// Projects a world-space point into screen space.
    fn to_screen(&self, world: Vec2) -> Vec2;

    /// Returns the screen the camera is currently locked to.
    fn current_screen(&self) -> ScreenId;
}

/// A camera locked to one screen of the fixed vertical stack.
///
/// Projection subtracts the screen's world origin; within the active
/// screen, world x maps straight through.
#[derive(Debug, Clone, Copy)]
pub struct FixedCamera {
    /// Screen the camera is showing
    screen: ScreenId,
}

impl FixedCamera {
    /// Creates a camera locked to `screen`.
    #[must_use]
    pub const fn new(screen: ScreenId) -> Self {
        Self { screen }
    }

    /// Locks the camera to a different screen.
    pub fn set_screen(&mut self, screen: ScreenId) {
        self.screen = screen;
    }
}

impl CameraView for FixedCamera {
    fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.screen.world_origin()
    }

    fn current_screen(&self) -> ScreenId {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_common::SCREEN_HEIGHT;

    #[test]
    fn test_screen_zero_is_identity() {
        let camera = FixedCamera::new(ScreenId::new(0));
        let p = Vec2::new(123.0, 45.0);
        assert_eq!(camera.to_screen(p), p);
    }

    #[test]
    fn test_higher_screen_offsets_y() {
        let camera = FixedCamera::new(ScreenId::new(2));
        let world = Vec2::new(100.0, -2.0 * SCREEN_HEIGHT + 50.0);
        let screen = camera.to_screen(world);
        assert_eq!(screen, Vec2::new(100.0, 50.0));
    }
}
