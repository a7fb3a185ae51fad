//! Raven NPC entities.
//!
//! [`RavenEntity`] is the plain raven: velocity-driven motion with an
//! idle/flying animation toggle. [`MessengerRaven`] composes it with a
//! scripted flight sequence that lands on cached floor geometry, shows a
//! message overlay, then flies back out the way it came.

use crate::animation::LoopingAnimation;
use crate::content::{overlays_enabled, AnimationSet, ContentProvider};
use crate::events::RavenEvent;
use crate::manager::{DrawCtx, Entity, UpdateCtx};
use crate::overlay::{clamp_message_x, OverlayAnchor, OverlayColor};
use crate::state::{FlightPlan, MotionState, StateMachine};
use corvid_common::{CorvidResult, EntityId, OverlayId, SCREEN_WIDTH};
use glam::Vec2;

/// Distance a raven covers per tick while on a scripted flight.
pub const RAVEN_SPEED: f32 = 3.0;

/// How long a delivered message stays on screen, in seconds.
pub const MAX_MESSAGE_SECONDS: f32 = 3.0;

/// Seconds per frame of the idle loop.
const IDLE_FRAME_SECONDS: f32 = 0.1;

/// Seconds per frame of the flight loop.
const FLY_FRAME_SECONDS: f32 = 0.05;

/// Extra gap between a raven and its name label, in pixels.
const NAME_GAP: f32 = 20.0;

/// Vertical offset of the message overlay above the raven, in pixels.
const MESSAGE_Y_OFFSET: f32 = -20.0;

/// A raven with velocity-driven motion and an idle/flying animation
/// toggle.
///
/// Velocity is per-tick, not persistent: it is applied to the transform
/// and zeroed at the end of every update, so whatever drives the raven
/// must re-supply it each tick to sustain movement.
#[derive(Debug)]
pub struct RavenEntity {
    /// Unique ID
    id: EntityId,
    /// World-space position
    transform: Vec2,
    /// Per-tick velocity contribution
    velocity: Vec2,
    /// Idle/flying animation machine
    motion: StateMachine<MotionState>,
    /// Whether the sprite is drawn mirrored (facing left)
    flip_x: bool,
    /// Sprite size in pixels
    size: Vec2,
    /// Observed by the entity manager to remove this entity
    ready_to_be_destroyed: bool,
}

impl RavenEntity {
    /// Creates a raven at `transform`.
    ///
    /// Fails fast if the content provider cannot supply the raven's
    /// animation sets; a raven without animations is unconstructible.
    pub fn new(transform: Vec2, content: &dyn ContentProvider) -> CorvidResult<Self> {
        let idle = LoopingAnimation::new(
            content.animation_frames(AnimationSet::RavenIdle)?,
            IDLE_FRAME_SECONDS,
        )?;
        let fly = LoopingAnimation::new(
            content.animation_frames(AnimationSet::RavenFly)?,
            FLY_FRAME_SECONDS,
        )?;
        let size = content.sprite_size(AnimationSet::RavenBlink);

        let mut motion = StateMachine::new(MotionState::Idle);
        motion.register(MotionState::Idle, Some(idle));
        motion.register(MotionState::Flying, Some(fly));

        Ok(Self {
            id: EntityId::new(),
            transform,
            velocity: Vec2::ZERO,
            motion,
            flip_x: false,
            size,
            ready_to_be_destroyed: false,
        })
    }

    /// Returns the raven's world-space position.
    #[must_use]
    pub const fn transform(&self) -> Vec2 {
        self.transform
    }

    /// Returns the raven's sprite size in pixels.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Returns the current motion state.
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        self.motion.active()
    }

    /// Whether the sprite is currently drawn mirrored (facing left).
    #[must_use]
    pub const fn facing_left(&self) -> bool {
        self.flip_x
    }

    /// Adds a velocity contribution for this tick.
    pub fn add_velocity(&mut self, dv: Vec2) {
        self.velocity += dv;
    }

    /// The shared per-tick contract: integrate velocity, refresh the
    /// facing flag, toggle the motion state, advance the animation, and
    /// zero the velocity for the next tick.
    fn base_update(&mut self, dt: f32) -> CorvidResult<()> {
        self.transform += self.velocity;

        if self.velocity.length() > f32::EPSILON {
            self.flip_x = self.velocity.x < 0.0;
        }

        self.motion.set_state(MotionState::from_velocity(self.velocity))?;
        self.motion.advance(dt);

        self.velocity = Vec2::ZERO;
        Ok(())
    }

    /// Draws the active animation frame, or nothing when no animation is
    /// active.
    fn base_draw(&self, ctx: &mut DrawCtx<'_>) {
        let Some(animation) = self.motion.active_animation() else {
            return;
        };
        let screen_pos = ctx.camera.to_screen(self.transform);
        ctx.renderer
            .draw_sprite(animation.active_frame(), screen_pos, self.flip_x);
    }
}

impl Entity for RavenEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, _ctx: &mut UpdateCtx<'_>, dt: f32) -> CorvidResult<()> {
        self.base_update(dt)
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) {
        self.base_draw(ctx);
    }

    fn ready_to_be_destroyed(&self) -> bool {
        self.ready_to_be_destroyed
    }
}

/// A raven that delivers a message: it waits for a landing candidate,
/// flies to it, shows the message for a fixed time, then leaves the
/// screen and flags itself for destruction.
pub struct MessengerRaven {
    /// Shared raven behavior (motion, animation, drawing)
    base: RavenEntity,
    /// Scripted flight machine
    plan: StateMachine<FlightPlan>,
    /// Message shown while perched
    message: String,
    /// Optional display name shown under the raven
    name: Option<String>,
    /// Color of the name label
    name_color: OverlayColor,
    /// Whether the overlay font loaded; when false, labels are disabled
    overlays_enabled: bool,
    /// Live name label handle
    name_overlay: Option<OverlayId>,
    /// Live message label handle
    message_overlay: Option<OverlayId>,
    /// Vertical offset of the name label below the raven
    name_y_offset: f32,
    /// Where the scripted flight began
    start: Vec2,
    /// Chosen landing position
    target: Vec2,
    /// Distance covered along the straight start-target line
    progress: f32,
    /// Normalized direction the raven flew in on
    entry_dir: Vec2,
    /// Seconds the message has been visible
    message_timer: f32,
    /// Uniform landing-candidate pick
    rng: fastrand::Rng,
}

impl MessengerRaven {
    /// Creates a messenger raven at `transform` carrying `message`.
    ///
    /// `name` is shown under the raven when present; pass `None` for an
    /// anonymous raven.
    pub fn new(
        transform: Vec2,
        message: impl Into<String>,
        name: Option<String>,
        name_color: OverlayColor,
        content: &dyn ContentProvider,
    ) -> CorvidResult<Self> {
        let base = RavenEntity::new(transform, content)?;

        let mut plan = StateMachine::new(FlightPlan::Starting);
        for phase in [
            FlightPlan::Starting,
            FlightPlan::FlyingToPoint,
            FlightPlan::Messaging,
            FlightPlan::FlyingAway,
            FlightPlan::Ending,
        ] {
            plan.register(phase, None);
        }

        Ok(Self {
            base,
            plan,
            message: message.into(),
            name: name.filter(|n| !n.trim().is_empty()),
            name_color,
            overlays_enabled: overlays_enabled(content),
            name_overlay: None,
            message_overlay: None,
            name_y_offset: 0.0,
            start: Vec2::ZERO,
            target: Vec2::ZERO,
            progress: 0.0,
            entry_dir: Vec2::ZERO,
            message_timer: 0.0,
            rng: fastrand::Rng::new(),
        })
    }

    /// Seeds the landing-candidate pick, for deterministic tests.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Returns the current scripted flight phase.
    #[must_use]
    pub fn phase(&self) -> FlightPlan {
        self.plan.active()
    }

    /// Returns the raven's world-space position.
    #[must_use]
    pub const fn transform(&self) -> Vec2 {
        self.base.transform()
    }

    /// Runs one tick of the scripted flight. Exactly one phase executes
    /// per tick; the match is exhaustive over the closed phase set, so an
    /// unhandled phase cannot exist at runtime.
    fn update_plan(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) -> CorvidResult<()> {
        match self.plan.active() {
            FlightPlan::Starting => {
                // Await landing candidates; an empty list is not an
                // error, just not-yet-ready, retried next tick.
                let screen = ctx.camera.current_screen();
                let candidates = ctx.landing.possible_floor_positions(screen);
                if !candidates.is_empty() {
                    self.target = candidates[self.rng.usize(..candidates.len())];
                    self.start = self.base.transform;
                    self.progress = 0.0;
                    self.plan.set_state(FlightPlan::FlyingToPoint)?;
                }
            }
            FlightPlan::FlyingToPoint => {
                let entry = self.target - self.start;
                let distance = entry.length();
                self.entry_dir = if distance > f32::EPSILON {
                    entry / distance
                } else {
                    Vec2::ZERO
                };
                self.progress += RAVEN_SPEED;

                if self.progress >= distance {
                    // Snap exactly onto the target; the final partial
                    // step is absorbed rather than overshot.
                    self.base.transform = self.target;
                    self.plan.set_state(FlightPlan::Messaging)?;
                    ctx.events.publish(RavenEvent::Landed {
                        entity_id: self.base.id,
                    });
                } else {
                    self.base.velocity = self.entry_dir * RAVEN_SPEED;
                }
            }
            FlightPlan::Messaging => {
                if self.message_overlay.is_none() && self.overlays_enabled {
                    self.show_message(ctx);
                }
                self.message_timer += dt;
                if self.message_timer > MAX_MESSAGE_SECONDS {
                    if let Some(overlay) = self.message_overlay.take() {
                        ctx.overlays.destroy(overlay);
                    }
                    ctx.events.publish(RavenEvent::MessageExpired {
                        entity_id: self.base.id,
                    });
                    self.plan.set_state(FlightPlan::FlyingAway)?;
                }
            }
            FlightPlan::FlyingAway => {
                let exit = Vec2::new(self.entry_dir.x, -self.entry_dir.y);
                let exit = if exit.length_squared() > f32::EPSILON {
                    exit.normalize()
                } else {
                    // Degenerate entry (spawned on the perch): leave
                    // horizontally so the raven still exits the screen.
                    Vec2::NEG_X
                };
                self.base.velocity = exit * RAVEN_SPEED;

                // The exit bound extends the screen by a full sprite
                // width on either side, so the raven is fully clear
                // before it is destroyed.
                let width = self.base.size.x;
                let x = self.base.transform.x;
                if x < -width || x > SCREEN_WIDTH + width {
                    ctx.events.publish(RavenEvent::Departed {
                        entity_id: self.base.id,
                    });
                    self.plan.set_state(FlightPlan::Ending)?;
                    self.base.ready_to_be_destroyed = true;
                    self.base.velocity = Vec2::ZERO;
                }
            }
            // Terminal: the destroy flag stays set and the entity
            // manager removes the raven; nothing further runs here.
            FlightPlan::Ending => {}
        }
        Ok(())
    }

    /// Creates the message overlay above the raven, clamped so it stays
    /// on screen (left edge wins for oversized messages).
    fn show_message(&mut self, ctx: &mut UpdateCtx<'_>) {
        let mut position = self.base.transform + Vec2::new(0.0, MESSAGE_Y_OFFSET);
        let text_size = ctx.overlays.measure(&self.message);
        position.x = clamp_message_x(position.x, text_size.x, SCREEN_WIDTH);

        let overlay = ctx.overlays.create(
            &self.message,
            ctx.camera.to_screen(position),
            OverlayColor::WHITE,
            OverlayAnchor::Center,
        );
        self.message_overlay = Some(overlay);
        ctx.events.publish(RavenEvent::MessageShown {
            entity_id: self.base.id,
            message: self.message.clone(),
        });
    }

    /// Keeps the name label tracking the raven, creating it on the first
    /// tick the overlay provider is available.
    fn update_name_overlay(&mut self, ctx: &mut UpdateCtx<'_>) {
        let Some(name) = self.name.as_deref() else {
            return;
        };
        if !self.overlays_enabled {
            return;
        }

        if self.name_overlay.is_none() {
            let size = ctx.overlays.measure(name);
            self.name_y_offset = size.y / 2.0 + NAME_GAP;
            let position = self.base.transform + Vec2::new(0.0, self.name_y_offset);
            let overlay = ctx.overlays.create(
                name,
                ctx.camera.to_screen(position),
                self.name_color,
                OverlayAnchor::Center,
            );
            self.name_overlay = Some(overlay);
        } else if let Some(overlay) = self.name_overlay {
            let position = self.base.transform + Vec2::new(0.0, self.name_y_offset);
            ctx.overlays.set_position(overlay, ctx.camera.to_screen(position));
        }
    }
}

impl Entity for MessengerRaven {
    fn id(&self) -> EntityId {
        self.base.id
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) -> CorvidResult<()> {
        self.update_plan(ctx, dt)?;
        self.base.base_update(dt)?;
        self.update_name_overlay(ctx);
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) {
        self.base.base_draw(ctx);
    }

    fn ready_to_be_destroyed(&self) -> bool {
        self.base.ready_to_be_destroyed
    }

    fn dispose(&mut self, ctx: &mut UpdateCtx<'_>) {
        if let Some(overlay) = self.name_overlay.take() {
            ctx.overlays.destroy(overlay);
        }
        if let Some(overlay) = self.message_overlay.take() {
            ctx.overlays.destroy(overlay);
        }
    }
}
