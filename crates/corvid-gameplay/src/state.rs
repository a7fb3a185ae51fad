//! Unified keyed state machine for entity behavior.
//!
//! One mechanism covers both uses the ravens need:
//! - a two-state motion toggle (idle vs. flying) driven by velocity, and
//! - a scripted five-phase flight sequence driven by per-tick logic.
//!
//! Each registered state may bind a looping animation. Entering a state
//! installs its animation (implicitly, by key lookup); leaving a state
//! resets the outgoing animation so a later re-entry starts from frame
//! zero. `set_state` with the active key is a no-op, so callers may set
//! the desired state every tick.

use crate::animation::LoopingAnimation;
use ahash::AHashMap;
use corvid_common::{CorvidError, CorvidResult};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Bound on the key types a state machine can be driven by: a closed,
/// copyable enumeration.
pub trait StateKey: Copy + Eq + Hash + Debug {}

impl<K: Copy + Eq + Hash + Debug> StateKey for K {}

/// Per-state slot inside a machine.
#[derive(Debug)]
struct StateSlot {
    /// Animation shown while the state is active, if any
    animation: Option<LoopingAnimation>,
}

/// A keyed state machine with per-state animation slots.
#[derive(Debug)]
pub struct StateMachine<K: StateKey> {
    /// Registered states
    states: AHashMap<K, StateSlot>,
    /// Currently active key
    active: K,
}

impl<K: StateKey> StateMachine<K> {
    /// Creates a machine whose initial state is `initial`.
    ///
    /// The initial state must be registered before the first tick;
    /// `set_state` fails fast on any unregistered key.
    #[must_use]
    pub fn new(initial: K) -> Self {
        Self {
            states: AHashMap::new(),
            active: initial,
        }
    }

    /// Registers a state, optionally binding the animation shown while
    /// the state is active. States are registered once, at entity
    /// construction, and live for the entity's full lifetime.
    pub fn register(&mut self, key: K, animation: Option<LoopingAnimation>) {
        self.states.insert(key, StateSlot { animation });
    }

    /// Returns the currently active key.
    #[must_use]
    pub fn active(&self) -> K {
        self.active
    }

    /// Transitions to `key`.
    ///
    /// A no-op when `key` is already active. Otherwise the outgoing
    /// state's animation is reset (the exit contract) and `key` becomes
    /// active. An unregistered key is a fatal fault, not a silent no-op.
    pub fn set_state(&mut self, key: K) -> CorvidResult<()> {
        if key == self.active {
            return Ok(());
        }
        if !self.states.contains_key(&key) {
            return Err(CorvidError::UnhandledState(format!("{key:?}")));
        }
        if let Some(slot) = self.states.get_mut(&self.active) {
            if let Some(animation) = slot.animation.as_mut() {
                animation.reset();
            }
        }
        self.active = key;
        Ok(())
    }

    /// Returns the active state's animation, if it has one.
    #[must_use]
    pub fn active_animation(&self) -> Option<&LoopingAnimation> {
        self.states.get(&self.active)?.animation.as_ref()
    }

    /// Advances the active state's animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if let Some(slot) = self.states.get_mut(&self.active) {
            if let Some(animation) = slot.animation.as_mut() {
                animation.advance(dt);
            }
        }
    }
}

/// Motion states for a raven driven purely by its velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing still on a perch
    Idle,
    /// Airborne
    Flying,
}

impl MotionState {
    /// Derives the motion state from a velocity: flying iff the speed
    /// strictly exceeds epsilon. The two transitions are complementary,
    /// so exactly one state is indicated each tick.
    #[must_use]
    pub fn from_velocity(velocity: Vec2) -> Self {
        if velocity.length() > f32::EPSILON {
            Self::Flying
        } else {
            Self::Idle
        }
    }
}

/// Scripted phases of a messenger raven's flight, evaluated once per
/// tick in declaration order with no backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightPlan {
    /// Waiting for a landing candidate on the current screen
    Starting,
    /// En route to the chosen landing position
    FlyingToPoint,
    /// Perched, message overlay visible
    Messaging,
    /// Leaving the screen along the mirrored entry direction
    FlyingAway,
    /// Terminal: flagged for destruction by the entity manager
    Ending,
}
