//! Messenger raven spawning.
//!
//! Thin glue between an incoming message (chat or otherwise, wiring out
//! of scope) and a registered [`MessengerRaven`]: applies the excluded-
//! term filter, builds the entity, and hands it to the registry.

use crate::content::ContentProvider;
use crate::filter::ExcludedTermFilter;
use crate::manager::EntityRegistry;
use crate::overlay::OverlayColor;
use crate::raven::MessengerRaven;
use corvid_common::{CorvidResult, EntityId};
use glam::Vec2;
use tracing::warn;

/// A request to spawn one messenger raven.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    /// World-space spawn position
    pub position: Vec2,
    /// Message the raven delivers
    pub message: String,
    /// Optional sender name shown under the raven
    pub name: Option<String>,
    /// Color of the name label
    pub name_color: OverlayColor,
}

impl SpawnRequest {
    /// Creates an anonymous spawn request.
    #[must_use]
    pub fn new(position: Vec2, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            name: None,
            name_color: OverlayColor::WHITE,
        }
    }

    /// Attaches a named sender.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, color: OverlayColor) -> Self {
        self.name = Some(name.into());
        self.name_color = color;
        self
    }
}

/// Builds and registers messenger ravens from spawn requests.
pub struct RavenSpawner<F: ExcludedTermFilter> {
    /// Message exclusion filter
    filter: F,
}

impl<F: ExcludedTermFilter> RavenSpawner<F> {
    /// Creates a spawner with the given exclusion filter.
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    /// Spawns a raven for `request`, unless the message contains an
    /// excluded term. Returns the new entity's ID, or `None` when the
    /// message was filtered out.
    pub fn spawn(
        &mut self,
        request: SpawnRequest,
        content: &dyn ContentProvider,
        registry: &mut dyn EntityRegistry,
    ) -> CorvidResult<Option<EntityId>> {
        if self.filter.contains_excluded_term(&request.message) {
            warn!("dropping raven message containing an excluded term");
            return Ok(None);
        }

        let raven = MessengerRaven::new(
            request.position,
            request.message,
            request.name,
            request.name_color,
            content,
        )?;
        Ok(Some(registry.register(Box::new(raven))))
    }
}
