//! Ghost player NPC entity.
//!
//! A [`GhostPlayer`] mirrors another player's avatar: its position is fed
//! in from outside each tick and it toggles between the player idle and
//! jump poses based on how far that feed moved it. Where the positions
//! come from (a replay, a network session) is the caller's concern.

use crate::animation::LoopingAnimation;
use crate::content::{AnimationSet, ContentProvider};
use crate::manager::{DrawCtx, Entity, UpdateCtx};
use crate::state::{MotionState, StateMachine};
use corvid_common::{CorvidResult, EntityId};
use glam::Vec2;

/// Seconds per frame of the standing pose.
const IDLE_FRAME_SECONDS: f32 = 0.1;

/// Seconds per frame of the jump pose.
const JUMP_FRAME_SECONDS: f32 = 0.05;

/// A remote player's avatar, driven by externally reported positions.
///
/// Each reported position becomes a one-tick velocity toward it, so the
/// idle/jumping pose toggle and the facing flag fall out of the same
/// velocity contract the ravens use. A tick with no report leaves the
/// ghost standing where it is.
#[derive(Debug)]
pub struct GhostPlayer {
    /// Unique ID
    id: EntityId,
    /// World-space position
    transform: Vec2,
    /// Per-tick velocity derived from the reported position
    velocity: Vec2,
    /// Idle/jumping pose machine
    motion: StateMachine<MotionState>,
    /// Whether the sprite is drawn mirrored (facing left)
    flip_x: bool,
    /// Observed by the entity manager to remove this entity
    ready_to_be_destroyed: bool,
}

impl GhostPlayer {
    /// Creates a ghost player at `transform`.
    ///
    /// Fails fast if the content provider cannot supply the player
    /// poses; a ghost without sprites is unconstructible.
    pub fn new(transform: Vec2, content: &dyn ContentProvider) -> CorvidResult<Self> {
        let idle = LoopingAnimation::new(
            content.animation_frames(AnimationSet::PlayerIdle)?,
            IDLE_FRAME_SECONDS,
        )?;
        let jump = LoopingAnimation::new(
            content.animation_frames(AnimationSet::PlayerJump)?,
            JUMP_FRAME_SECONDS,
        )?;

        let mut motion = StateMachine::new(MotionState::Idle);
        motion.register(MotionState::Idle, Some(idle));
        motion.register(MotionState::Flying, Some(jump));

        Ok(Self {
            id: EntityId::new(),
            transform,
            velocity: Vec2::ZERO,
            motion,
            flip_x: false,
            ready_to_be_destroyed: false,
        })
    }

    /// Returns the ghost's world-space position.
    #[must_use]
    pub const fn transform(&self) -> Vec2 {
        self.transform
    }

    /// Returns the current pose state.
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        self.motion.active()
    }

    /// Whether the sprite is currently drawn mirrored (facing left).
    #[must_use]
    pub const fn facing_left(&self) -> bool {
        self.flip_x
    }

    /// Feeds the latest reported position; the ghost moves there on its
    /// next update.
    pub fn report_position(&mut self, world: Vec2) {
        self.velocity = world - self.transform;
    }

    /// Flags the ghost for removal, for when its source goes away.
    pub fn mark_for_removal(&mut self) {
        self.ready_to_be_destroyed = true;
    }
}

impl Entity for GhostPlayer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, _ctx: &mut UpdateCtx<'_>, dt: f32) -> CorvidResult<()> {
        self.transform += self.velocity;

        if self.velocity.length() > f32::EPSILON {
            self.flip_x = self.velocity.x < 0.0;
        }

        self.motion.set_state(MotionState::from_velocity(self.velocity))?;
        self.motion.advance(dt);

        self.velocity = Vec2::ZERO;
        Ok(())
    }

    fn draw(&self, ctx: &mut DrawCtx<'_>) {
        let Some(animation) = self.motion.active_animation() else {
            return;
        };
        let screen_pos = ctx.camera.to_screen(self.transform);
        ctx.renderer
            .draw_sprite(animation.active_frame(), screen_pos, self.flip_x);
    }

    fn ready_to_be_destroyed(&self) -> bool {
        self.ready_to_be_destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FixedCamera;
    use crate::content::stubs::{RecordingOverlays, StubContent};
    use crate::events::EventBus;
    use crate::landing::{LandingPositionCache, LevelGeometry};
    use crate::manager::SpriteRenderer;
    use corvid_common::ScreenId;

    struct NoGeometry;

    impl LevelGeometry for NoGeometry {
        fn floor_positions(&self, _screen: ScreenId) -> Vec<Vec2> {
            Vec::new()
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn tick(ghost: &mut GhostPlayer, dt: f32) {
        let camera = FixedCamera::new(ScreenId::new(0));
        let mut landing = LandingPositionCache::new(Box::new(NoGeometry));
        let mut overlays = RecordingOverlays::new();
        let bus = EventBus::default();
        let mut ctx = UpdateCtx {
            camera: &camera,
            landing: &mut landing,
            overlays: &mut overlays,
            events: &bus,
        };
        ghost.update(&mut ctx, dt).expect("ghost update");
    }

    #[test]
    fn test_pose_follows_reported_positions() {
        let mut ghost =
            GhostPlayer::new(Vec2::ZERO, &StubContent::default()).expect("ghost player");
        assert_eq!(ghost.motion_state(), MotionState::Idle);

        ghost.report_position(Vec2::new(-5.0, 2.0));
        tick(&mut ghost, DT);
        assert_eq!(ghost.motion_state(), MotionState::Flying);
        assert!(ghost.facing_left());
        assert_eq!(ghost.transform(), Vec2::new(-5.0, 2.0));

        // No report this tick: the ghost stands still and keeps facing.
        tick(&mut ghost, DT);
        assert_eq!(ghost.motion_state(), MotionState::Idle);
        assert!(ghost.facing_left());
        assert_eq!(ghost.transform(), Vec2::new(-5.0, 2.0));
    }

    #[test]
    fn test_repeated_report_of_same_position_stays_idle() {
        let at = Vec2::new(30.0, 40.0);
        let mut ghost = GhostPlayer::new(at, &StubContent::default()).expect("ghost player");

        for _ in 0..5 {
            ghost.report_position(at);
            tick(&mut ghost, DT);
        }
        assert_eq!(ghost.motion_state(), MotionState::Idle);
        assert_eq!(ghost.transform(), at);
    }

    #[test]
    fn test_mark_for_removal_sets_destroy_flag() {
        let mut ghost =
            GhostPlayer::new(Vec2::ZERO, &StubContent::default()).expect("ghost player");
        assert!(!ghost.ready_to_be_destroyed());
        ghost.mark_for_removal();
        assert!(ghost.ready_to_be_destroyed());
    }

    #[test]
    fn test_draw_uses_active_pose_frame() {
        struct CaptureFrames(Vec<u32>);

        impl SpriteRenderer for CaptureFrames {
            fn draw_sprite(&mut self, frame: &crate::animation::SpriteFrame, _pos: Vec2, _flip: bool) {
                self.0.push(frame.sprite_id);
            }
        }

        let mut ghost =
            GhostPlayer::new(Vec2::ZERO, &StubContent::default()).expect("ghost player");
        ghost.report_position(Vec2::new(10.0, 0.0));
        tick(&mut ghost, DT);

        let camera = FixedCamera::new(ScreenId::new(0));
        let mut renderer = CaptureFrames(Vec::new());
        let mut ctx = DrawCtx {
            camera: &camera,
            renderer: &mut renderer,
        };
        ghost.draw(&mut ctx);

        // Stub jump frames start at 400.
        assert_eq!(renderer.0.len(), 1);
        assert!((400..500).contains(&renderer.0[0]));
    }
}
