//! Per-frame character controller
//!
//! Turns a [`MovementIntent`] into velocity and position changes:
//! slide transitions, speed selection, ground/air horizontal control,
//! wall-run detection, gravity, jumps, then sub-stepped integration with
//! collision resolution.

use crate::character::Character;
use crate::config::MovementConfig;
use crate::registry::GeometryRegistry;
use crate::resolver::CollisionResolver;
use crate::wall_run::{wall_normal, WallRunDetector};
use parkour_math::Vec3;

/// Per-frame movement request
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementIntent {
    /// Forward/back intent in -1..1
    pub forward: f32,
    /// Right/left intent in -1..1
    pub right: f32,
    /// A jump request that has not been consumed yet
    pub jump: bool,
    /// Slide is held
    pub slide: bool,
    /// Sprint was toggled this frame
    pub sprint_toggled: bool,
    /// Camera yaw in radians
    pub yaw: f32,
}

impl MovementIntent {
    /// No input, facing `yaw`
    pub fn idle(yaw: f32) -> Self {
        Self {
            yaw,
            ..Default::default()
        }
    }

    /// Unnormalized world-space direction of the directional intent
    pub fn direction(&self) -> Vec3 {
        let forward = self.forward.clamp(-1.0, 1.0);
        let right = self.right.clamp(-1.0, 1.0);
        Vec3::forward_from_yaw(self.yaw) * forward + Vec3::right_from_yaw(self.yaw) * right
    }

    pub fn is_moving(&self) -> bool {
        self.direction().length_squared() > 0.0
    }
}

/// Which kind of jump a frame performed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Slide,
    Wall,
}

/// What happened during one controller update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// The jump request was consumed
    pub jump: Option<JumpKind>,
    /// The character fell out of the world and was respawned
    pub respawned: bool,
}

/// Drives a player character from input
#[derive(Clone, Debug, Default)]
pub struct CharacterController {
    pub config: MovementConfig,
}

impl CharacterController {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Run one frame of movement
    ///
    /// The caller must clear its pending jump when the outcome reports a
    /// consumed jump; an unconsumed request stays pending.
    pub fn update(
        &self,
        character: &mut Character,
        intent: &MovementIntent,
        registry: &GeometryRegistry,
        dt: f32,
    ) -> FrameOutcome {
        let config = &self.config;
        character.wall_run_cooldown = (character.wall_run_cooldown - dt).max(0.0);

        if intent.sprint_toggled {
            character.is_sprinting = !character.is_sprinting;
        }

        let direction = intent.direction();
        let moving = direction.length_squared() > 0.0;

        self.update_slide(character, intent.slide, moving, dt);

        let speed = if character.is_sliding {
            character.slide_speed
        } else if character.is_sprinting {
            config.sprint_speed
        } else {
            config.walk_speed
        };
        character.blend_height(config.height_blend_rate, dt);

        self.apply_horizontal(character, direction.normalized(), moving, speed, dt);

        let right = Vec3::right_from_yaw(intent.yaw);
        WallRunDetector::new(registry, &config.wall_run).update(character, right, dt);

        if !character.on_ground {
            let gravity = if character.is_wall_running {
                config.wall_run.gravity
            } else {
                config.gravity
            };
            character.velocity.y -= gravity * dt;
        }

        let jump = if intent.jump {
            self.jump(character, intent.yaw)
        } else {
            None
        };

        let resolver = CollisionResolver::new(registry, &config.collision);
        let respawned = resolver.move_and_resolve(character, dt);
        character.settle_contact_state();

        FrameOutcome { jump, respawned }
    }

    fn update_slide(&self, character: &mut Character, wants_slide: bool, moving: bool, dt: f32) {
        let config = &self.config;
        if wants_slide && moving && character.on_ground && !character.is_sliding {
            character.is_sliding = true;
            character.slide_speed = config.slide_speed;
            log::trace!("Slide started at {:.1}", character.slide_speed);
        } else if !wants_slide || !moving {
            character.is_sliding = false;
        }

        if character.is_sliding && character.slide_speed > config.walk_speed {
            character.slide_speed =
                (character.slide_speed - config.slide_decay * dt).max(config.walk_speed);
        }
    }

    fn apply_horizontal(
        &self,
        character: &mut Character,
        direction: Vec3,
        moving: bool,
        speed: f32,
        dt: f32,
    ) {
        let config = &self.config;
        if moving {
            if character.on_ground || character.is_wall_running {
                character.velocity.x = direction.x * speed;
                character.velocity.z = direction.z * speed;
            } else {
                character.velocity.x += direction.x * speed * config.air_control;
                character.velocity.z += direction.z * speed * config.air_control;
                let horizontal = character.horizontal_speed();
                if horizontal > speed {
                    let scale = speed / horizontal;
                    character.velocity.x *= scale;
                    character.velocity.z *= scale;
                }
            }
        } else if character.on_ground {
            character.velocity.x *= config.ground_damping;
            character.velocity.z *= config.ground_damping;
        } else {
            let damping = if character.slide_boost_time > 0.0 {
                config.boost_damping
            } else {
                config.air_damping
            };
            character.velocity.x *= damping;
            character.velocity.z *= damping;
        }
        // The boost window runs out whether or not it was used this frame
        character.slide_boost_time = (character.slide_boost_time - dt).max(0.0);
    }

    /// Slide-jump, ground jump or wall-jump, whichever applies
    fn jump(&self, character: &mut Character, yaw: f32) -> Option<JumpKind> {
        let config = &self.config;
        if character.on_ground {
            let kind = if character.is_sliding {
                let heading = character.velocity.horizontal().normalized();
                if heading.length_squared() > 0.0 {
                    character.velocity.x = heading.x * config.slide_jump_speed;
                    character.velocity.z = heading.z * config.slide_jump_speed;
                }
                character.velocity.y = config.jump_force * config.slide_jump_factor;
                character.is_sliding = false;
                character.slide_boost_time = config.slide_boost_time;
                JumpKind::Slide
            } else {
                character.velocity.y = config.jump_force;
                JumpKind::Ground
            };
            character.on_ground = false;
            log::trace!("{:?} jump", kind);
            return Some(kind);
        }

        if character.is_wall_running {
            let wall = &config.wall_run;
            let away = wall_normal(character.wall_side, Vec3::right_from_yaw(yaw));
            let forward = Vec3::forward_from_yaw(yaw);
            let push = away * wall.jump_push + forward * wall.jump_forward;
            character.velocity.x = push.x;
            character.velocity.z = push.z;
            character.velocity.y = wall.jump_force;
            character.end_wall_run();
            character.wall_run_cooldown = wall.reentry_cooldown;
            log::trace!("Wall jump");
            return Some(JumpKind::Wall);
        }

        None
    }
}
