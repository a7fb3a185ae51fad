//! # Corvid Gameplay
//!
//! The raven entity subsystem.
//!
//! This crate provides the frame-driven NPC layer:
//! - Looping sprite animation component
//! - Unified keyed state machine (motion toggle and scripted flight)
//! - Per-screen landing-position cache over level geometry
//! - Raven entities, including the message-delivering messenger raven
//! - Ghost player avatars driven by externally reported positions
//! - Text overlay seam and layout helpers
//! - Entity manager with an update-then-draw frame contract
//! - Lifecycle event bus and spawn filtering
//!
//! The host engine owns rendering, content, and the frame loop; it drives
//! the subsystem through [`manager::EntityManager::tick`] and
//! [`manager::EntityManager::render`] once per frame and implements the
//! collaborator seams (camera, geometry, overlays, sprites, content).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod animation;
pub mod camera;
pub mod content;
pub mod events;
pub mod filter;
pub mod ghost;
pub mod landing;
pub mod manager;
pub mod overlay;
pub mod raven;
pub mod spawn;
pub mod state;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::content::{overlays_enabled, AnimationSet, ContentProvider};
    pub use crate::events::*;
    pub use crate::filter::*;
    pub use crate::ghost::*;
    pub use crate::landing::*;
    pub use crate::manager::*;
    pub use crate::overlay::*;
    pub use crate::raven::*;
    pub use crate::spawn::*;
    pub use crate::state::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::stubs::{RecordingOverlays, StubContent};
    use corvid_common::{ScreenId, SCREEN_WIDTH};
    use glam::Vec2;

    struct SingleLedge;

    impl LevelGeometry for SingleLedge {
        fn floor_positions(&self, _screen: ScreenId) -> Vec<Vec2> {
            vec![Vec2::new(100.0, 0.0)]
        }
    }

    struct NullRenderer;

    impl SpriteRenderer for NullRenderer {
        fn draw_sprite(&mut self, _frame: &SpriteFrame, _pos: Vec2, _flip_x: bool) {}
    }

    /// Full messenger flight through the entity manager: spawn, land on
    /// the only candidate, message for three seconds, fly off the right
    /// edge, get reaped.
    #[test]
    fn test_messenger_flight_end_to_end() {
        let content = StubContent::default();
        let camera = FixedCamera::new(ScreenId::new(0));
        let mut landing = LandingPositionCache::new(Box::new(SingleLedge));
        let mut overlays = RecordingOverlays::new();
        let mut renderer = NullRenderer;

        let mut manager = EntityManager::new();
        let mut spawner = RavenSpawner::new(NoExclusions);
        let id = spawner
            .spawn(
                SpawnRequest::new(Vec2::ZERO, "onwards").named("Huginn", OverlayColor::WHITE),
                &content,
                &mut manager,
            )
            .expect("spawn")
            .expect("not filtered");

        let dt = 0.1;
        let mut ticks = 0;
        while !manager.is_empty() {
            manager
                .tick(&camera, &mut landing, &mut overlays, dt)
                .expect("tick");
            manager.render(&camera, &mut renderer);
            ticks += 1;
            assert!(ticks < 1000, "raven never despawned");
        }

        // Flight: 1 pick tick + ceil(100/3) = 34 flight ticks, then 3s of
        // messaging at 0.1s per tick, then out past 480 + a sprite width.
        assert!(ticks > 34 + 30);

        let events = manager.events().drain();
        let kinds: Vec<&'static str> = events
            .iter()
            .map(|e| match e {
                RavenEvent::Spawned { .. } => "spawned",
                RavenEvent::Landed { .. } => "landed",
                RavenEvent::MessageShown { .. } => "shown",
                RavenEvent::MessageExpired { .. } => "expired",
                RavenEvent::Departed { .. } => "departed",
                RavenEvent::Despawned { .. } => "despawned",
            })
            .collect();
        assert_eq!(
            kinds,
            ["spawned", "landed", "shown", "expired", "departed", "despawned"]
        );
        assert!(events.iter().all(|e| match e {
            RavenEvent::Spawned { entity_id }
            | RavenEvent::Landed { entity_id }
            | RavenEvent::MessageShown { entity_id, .. }
            | RavenEvent::MessageExpired { entity_id }
            | RavenEvent::Departed { entity_id }
            | RavenEvent::Despawned { entity_id } => *entity_id == id,
        }));

        // Dispose released every overlay the raven created.
        assert!(overlays.live.is_empty());
    }

    /// Two ravens share the landing cache: the geometry is only scanned
    /// once per screen no matter how many ravens are in flight.
    #[test]
    fn test_ravens_share_landing_cache() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct CountingLedge(Rc<Cell<usize>>);

        impl LevelGeometry for CountingLedge {
            fn floor_positions(&self, _screen: ScreenId) -> Vec<Vec2> {
                self.0.set(self.0.get() + 1);
                vec![Vec2::new(200.0, 40.0), Vec2::new(360.0, 80.0)]
            }
        }

        let calls = Rc::new(Cell::new(0));
        let content = StubContent::default();
        let camera = FixedCamera::new(ScreenId::new(0));
        let mut landing = LandingPositionCache::new(Box::new(CountingLedge(Rc::clone(&calls))));
        let mut overlays = RecordingOverlays::new();

        let mut manager = EntityManager::new();
        let mut spawner = RavenSpawner::new(NoExclusions);
        for message in ["one", "two", "three"] {
            spawner
                .spawn(
                    SpawnRequest::new(Vec2::new(0.0, 20.0), message),
                    &content,
                    &mut manager,
                )
                .expect("spawn")
                .expect("not filtered");
        }

        for _ in 0..10 {
            manager
                .tick(&camera, &mut landing, &mut overlays, 0.1)
                .expect("tick");
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_plain_raven_drawn_at_projected_position() {
        struct CapturePositions(Vec<Vec2>);

        impl SpriteRenderer for CapturePositions {
            fn draw_sprite(&mut self, _frame: &SpriteFrame, pos: Vec2, _flip_x: bool) {
                self.0.push(pos);
            }
        }

        let content = StubContent::default();
        let screen = ScreenId::new(1);
        let camera = FixedCamera::new(screen);
        let spawn = screen.world_origin() + Vec2::new(SCREEN_WIDTH / 2.0, 100.0);
        let raven = RavenEntity::new(spawn, &content).expect("raven");

        let mut capture = CapturePositions(Vec::new());
        let mut ctx = DrawCtx {
            camera: &camera,
            renderer: &mut capture,
        };
        Entity::draw(&raven, &mut ctx);
        assert_eq!(capture.0, vec![Vec2::new(SCREEN_WIDTH / 2.0, 100.0)]);
    }
}
