//! # Corvid Common
//!
//! Common types and shared abstractions for the Corvid raven subsystem.
//!
//! This crate provides foundational types used across the subsystem:
//! - Screen-stack coordinate types and the fixed virtual resolution
//! - ID types (EntityId, OverlayId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id1.is_valid());
        assert!(!EntityId::NULL.is_valid());
    }

    #[test]
    fn test_screen_id_from_spawn_height() {
        // A raven spawned near the top edge of screen 3 stays on screen 3.
        let screen = coords::ScreenId::new(3);
        let spawn = screen.world_origin() + glam::Vec2::new(240.0, 10.0);
        assert_eq!(coords::ScreenId::containing(spawn), screen);
    }
}
