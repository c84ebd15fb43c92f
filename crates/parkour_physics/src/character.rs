//! Kinematic character state shared by the player and the AI
//!
//! The reference point (`position`) sits at eye height: the feet are
//! `current_height` below it and the collision box extends `headroom` above it.

use crate::config::MovementConfig;
use crate::shapes::Aabb;
use parkour_math::Vec3;

/// Which side of the character a wall is on while wall-running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

/// HUD-facing summary of what the character is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementStatus {
    Grounded,
    Airborne,
    Sliding,
    WallRunning,
    Sprinting,
}

impl MovementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MovementStatus::Grounded => "grounded",
            MovementStatus::Airborne => "airborne",
            MovementStatus::Sliding => "sliding",
            MovementStatus::WallRunning => "wall-running",
            MovementStatus::Sprinting => "sprinting",
        }
    }
}

/// Kinematic state of one character
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    /// Reference point (eye height)
    pub position: Vec3,
    pub velocity: Vec3,
    /// Where the character returns after falling out of the world
    pub spawn: Vec3,
    pub stand_height: f32,
    pub slide_height: f32,
    /// Interpolated height between `slide_height` and `stand_height`
    pub current_height: f32,
    pub radius: f32,
    pub headroom: f32,
    pub on_ground: bool,
    pub is_sliding: bool,
    pub is_sprinting: bool,
    pub is_wall_running: bool,
    pub wall_side: WallSide,
    /// Seconds spent on the current wall
    pub wall_run_time: f32,
    /// Seconds until wall-running is allowed again
    pub wall_run_cooldown: f32,
    /// Current decaying slide speed
    pub slide_speed: f32,
    /// Seconds left in the slide-jump momentum window
    pub slide_boost_time: f32,
}

impl Character {
    /// Create a standing character at `spawn`
    pub fn new(spawn: Vec3, config: &MovementConfig) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            spawn,
            stand_height: config.stand_height,
            slide_height: config.slide_height,
            current_height: config.stand_height,
            radius: config.radius,
            headroom: config.headroom,
            on_ground: false,
            is_sliding: false,
            is_sprinting: false,
            is_wall_running: false,
            wall_side: WallSide::None,
            wall_run_time: 0.0,
            wall_run_cooldown: 0.0,
            slide_speed: 0.0,
            slide_boost_time: 0.0,
        }
    }

    /// Height of the feet
    pub fn feet(&self) -> f32 {
        self.position.y - self.current_height
    }

    /// Collision box from the feet to the headroom margin
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(
                self.position.x - self.radius,
                self.feet(),
                self.position.z - self.radius,
            ),
            Vec3::new(
                self.position.x + self.radius,
                self.position.y + self.headroom,
                self.position.z + self.radius,
            ),
        )
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.horizontal_length()
    }

    /// Move to `position` and stop; transient movement states are cleared
    pub fn teleport_to(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.on_ground = false;
        self.is_sliding = false;
        self.slide_boost_time = 0.0;
        self.end_wall_run();
        self.wall_run_cooldown = 0.0;
    }

    /// Teleport back to the spawn point
    pub fn respawn(&mut self) {
        self.teleport_to(self.spawn);
        self.current_height = self.stand_height;
    }

    pub fn end_wall_run(&mut self) {
        self.is_wall_running = false;
        self.wall_side = WallSide::None;
        self.wall_run_time = 0.0;
    }

    /// Ease the current height toward the slide or stand height
    ///
    /// First-order filter: the gap shrinks by `1 - e^(-rate*dt)` each call,
    /// so the height never overshoots either bound. Grounded characters keep
    /// their feet planted and the reference point moves instead.
    pub fn blend_height(&mut self, rate: f32, dt: f32) {
        let target = if self.is_sliding {
            self.slide_height
        } else {
            self.stand_height
        };
        let previous = self.current_height;
        let blend = 1.0 - (-rate * dt.max(0.0)).exp();
        self.current_height += (target - self.current_height) * blend;
        self.current_height = self
            .current_height
            .clamp(self.slide_height, self.stand_height);
        if self.on_ground {
            self.position.y += self.current_height - previous;
        }
    }

    /// Reconcile flags after collision resolution
    ///
    /// Wall-running ends on touching ground and sliding ends on leaving it.
    pub fn settle_contact_state(&mut self) {
        if self.on_ground {
            if self.is_wall_running {
                self.end_wall_run();
            }
        } else {
            self.is_sliding = false;
        }
    }

    /// Status in HUD priority order
    pub fn status(&self) -> MovementStatus {
        if self.is_wall_running {
            MovementStatus::WallRunning
        } else if self.is_sliding {
            MovementStatus::Sliding
        } else if self.is_sprinting && self.horizontal_speed() > 1.0 {
            MovementStatus::Sprinting
        } else if !self.on_ground {
            MovementStatus::Airborne
        } else {
            MovementStatus::Grounded
        }
    }
}
