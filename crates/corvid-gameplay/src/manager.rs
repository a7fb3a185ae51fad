//! Entity manager and per-frame contexts.
//!
//! The manager owns the active entities and is driven by the host loop:
//! `tick` updates every entity (in registration order) before `render`
//! draws any of them, then reaps entities that flagged themselves ready
//! to be destroyed. Collaborators are passed in per frame rather than
//! held by entities, which keeps entity state self-contained.

use crate::animation::SpriteFrame;
use crate::camera::CameraView;
use crate::events::{EventBus, RavenEvent};
use crate::landing::LandingPositionCache;
use crate::overlay::OverlayProvider;
use corvid_common::{CorvidError, CorvidResult, EntityId};
use glam::Vec2;
use tracing::info;

/// Collaborators available to entities during an update tick.
pub struct UpdateCtx<'a> {
    /// Screen/camera projection
    pub camera: &'a dyn CameraView,
    /// Shared landing-position cache
    pub landing: &'a mut LandingPositionCache,
    /// Text overlay provider
    pub overlays: &'a mut dyn OverlayProvider,
    /// Lifecycle event bus
    pub events: &'a EventBus,
}

/// Collaborators available to entities during a draw pass.
pub struct DrawCtx<'a> {
    /// Screen/camera projection
    pub camera: &'a dyn CameraView,
    /// Sprite draw seam
    pub renderer: &'a mut dyn SpriteRenderer,
}

/// Sprite draw seam, implemented by the host renderer.
pub trait SpriteRenderer {
    /// Draws one frame at a screen-space position, optionally flipped
    /// horizontally.
    fn draw_sprite(&mut self, frame: &SpriteFrame, screen_pos: Vec2, flip_x: bool);
}

/// A managed entity with a per-frame update/draw contract.
pub trait Entity {
    /// Returns the entity's unique ID.
    fn id(&self) -> EntityId;

    /// Advances the entity by one tick of `dt` seconds.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) -> CorvidResult<()>;

    /// Draws the entity. Must not mutate gameplay state.
    fn draw(&self, ctx: &mut DrawCtx<'_>);

    /// Whether the manager should dispose and remove this entity.
    fn ready_to_be_destroyed(&self) -> bool {
        false
    }

    /// Releases resources the entity owns (overlays). Called by the
    /// manager exactly once, just before removal.
    fn dispose(&mut self, _ctx: &mut UpdateCtx<'_>) {}
}

/// Registry seam for adding and removing entities.
pub trait EntityRegistry {
    /// Adds an entity; returns its ID.
    fn register(&mut self, entity: Box<dyn Entity>) -> EntityId;

    /// Removes an entity without disposing it.
    fn deregister(&mut self, id: EntityId) -> CorvidResult<Box<dyn Entity>>;
}

/// Owner of the active entity list, driven once per frame by the host.
#[derive(Default)]
pub struct EntityManager {
    /// Active entities in registration order
    entities: Vec<Box<dyn Entity>>,
    /// Lifecycle event bus
    bus: EventBus,
}

impl EntityManager {
    /// Creates an empty manager with a default-capacity event bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of active entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entities are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the lifecycle event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Updates all entities, then reaps the ones that flagged themselves
    /// ready to be destroyed.
    ///
    /// The first entity fault aborts the tick; entity updates are
    /// independent, so nothing needs rolling back.
    pub fn tick(
        &mut self,
        camera: &dyn CameraView,
        landing: &mut LandingPositionCache,
        overlays: &mut dyn OverlayProvider,
        dt: f32,
    ) -> CorvidResult<()> {
        let events = &self.bus;
        let mut ctx = UpdateCtx {
            camera,
            landing,
            overlays,
            events,
        };

        for entity in &mut self.entities {
            entity.update(&mut ctx, dt)?;
        }

        // Reap after the full update pass so removal never reorders the
        // updates within a frame.
        let mut index = 0;
        while index < self.entities.len() {
            if self.entities[index].ready_to_be_destroyed() {
                let mut entity = self.entities.remove(index);
                entity.dispose(&mut ctx);
                let entity_id = entity.id();
                self.bus.publish(RavenEvent::Despawned { entity_id });
                info!(id = entity_id.raw(), "despawned entity");
            } else {
                index += 1;
            }
        }
        Ok(())
    }

    /// Draws all entities in registration order.
    pub fn render(&self, camera: &dyn CameraView, renderer: &mut dyn SpriteRenderer) {
        let mut ctx = DrawCtx { camera, renderer };
        for entity in &self.entities {
            entity.draw(&mut ctx);
        }
    }
}

impl EntityRegistry for EntityManager {
    fn register(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let entity_id = entity.id();
        self.entities.push(entity);
        self.bus.publish(RavenEvent::Spawned { entity_id });
        info!(id = entity_id.raw(), "registered entity");
        entity_id
    }

    fn deregister(&mut self, id: EntityId) -> CorvidResult<Box<dyn Entity>> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id() == id)
            .ok_or(CorvidError::EntityNotFound(id))?;
        Ok(self.entities.remove(index))
    }
}
