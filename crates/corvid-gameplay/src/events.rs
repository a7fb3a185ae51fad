//! Lifecycle event bus for raven entities.

use corvid_common::EntityId;
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Events published as ravens move through their lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RavenEvent {
    /// A raven was registered with the entity manager
    Spawned {
        /// Entity ID
        entity_id: EntityId,
    },
    /// A messenger raven reached its landing position
    Landed {
        /// Entity ID
        entity_id: EntityId,
    },
    /// A messenger raven's message overlay became visible
    MessageShown {
        /// Entity ID
        entity_id: EntityId,
        /// The message text
        message: String,
    },
    /// A message overlay timed out and was destroyed
    MessageExpired {
        /// Entity ID
        entity_id: EntityId,
    },
    /// A raven flew off screen and entered its terminal phase
    Departed {
        /// Entity ID
        entity_id: EntityId,
    },
    /// The entity manager observed the destroy flag and removed the raven
    Despawned {
        /// Entity ID
        entity_id: EntityId,
    },
}

/// Event bus for broadcasting raven lifecycle events.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<RavenEvent>,
    /// Receiver for collecting events
    receiver: Receiver<RavenEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus. Non-blocking: when the channel is
    /// full the event is dropped with a warning.
    pub fn publish(&self, event: RavenEvent) {
        if self.sender.try_send(event).is_err() {
            warn!("event bus full, dropping raven event");
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<RavenEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<RavenEvent> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        let id = EntityId::new();
        bus.publish(RavenEvent::Spawned { entity_id: id });
        bus.publish(RavenEvent::Despawned { entity_id: id });

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RavenEvent::Spawned { .. }));
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_events() {
        let bus = EventBus::new(1);
        let id = EntityId::new();
        bus.publish(RavenEvent::Landed { entity_id: id });
        bus.publish(RavenEvent::Departed { entity_id: id });
        assert_eq!(bus.drain().len(), 1);
    }
}
