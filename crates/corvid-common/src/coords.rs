//! Screen-stack coordinate types.
//!
//! The host game arranges its world as a vertical stack of fixed-size
//! screens. World space is measured in pixels with `y` growing downwards;
//! screen 0 covers world `y` in `[0, SCREEN_HEIGHT)`, screen 1 the band
//! above it, and so on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width of one screen in world pixels.
pub const SCREEN_WIDTH: f32 = 480.0;

/// Height of one screen in world pixels.
pub const SCREEN_HEIGHT: f32 = 360.0;

/// Identifies one screen in the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub i32);

impl ScreenId {
    /// Creates a screen ID from a raw index.
    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    /// Returns the raw screen index.
    #[must_use]
    pub const fn index(self) -> i32 {
        self.0
    }

    /// Returns the screen containing the given world position.
    ///
    /// Screens are counted upwards: larger indices are higher in the world,
    /// which in screen pixels means more negative `y`.
    #[must_use]
    pub fn containing(world: Vec2) -> Self {
        let band = (world.y / SCREEN_HEIGHT).floor() as i32;
        Self(-band)
    }

    /// Returns the world-space origin (top-left corner) of this screen.
    #[must_use]
    pub fn world_origin(self) -> Vec2 {
        Vec2::new(0.0, -(self.0 as f32) * SCREEN_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_screen_containing() {
        assert_eq!(ScreenId::containing(Vec2::new(100.0, 10.0)), ScreenId(0));
        assert_eq!(ScreenId::containing(Vec2::new(100.0, 359.0)), ScreenId(0));
        assert_eq!(ScreenId::containing(Vec2::new(0.0, -1.0)), ScreenId(1));
        assert_eq!(ScreenId::containing(Vec2::new(0.0, -360.0)), ScreenId(1));
        assert_eq!(ScreenId::containing(Vec2::new(0.0, -361.0)), ScreenId(2));
    }

    #[test]
    fn test_world_origin_round_trip() {
        for index in -3..=3 {
            let screen = ScreenId::new(index);
            let origin = screen.world_origin();
            assert_eq!(ScreenId::containing(origin), screen);
        }
    }

    proptest! {
        /// Any world point lies inside the band of the screen reported
        /// to contain it: its offset from that screen's origin falls in
        /// [0, SCREEN_HEIGHT), and x never affects the result.
        #[test]
        fn prop_containing_screen_band_holds_point(
            x in -2000.0f32..2000.0,
            y in -3600.0f32..3600.0,
        ) {
            // Tolerate float rounding only away from band boundaries.
            let band_pos = y.rem_euclid(SCREEN_HEIGHT);
            prop_assume!(band_pos > 1e-2 && band_pos < SCREEN_HEIGHT - 1e-2);

            let screen = ScreenId::containing(Vec2::new(x, y));
            let offset = y - screen.world_origin().y;
            prop_assert!(
                (0.0..SCREEN_HEIGHT).contains(&offset),
                "offset {} outside the screen band",
                offset
            );
            prop_assert_eq!(ScreenId::containing(Vec2::new(0.0, y)), screen);
        }
    }
}
