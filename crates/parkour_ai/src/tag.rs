//! Tag coordination between the player and the AI
//!
//! The side that is "it" chases the other. A capture inside the capture
//! radius swaps the roles, restarts the swap cooldown and separates the two
//! characters so they do not stay overlapped.

use rand::Rng;
use serde::{Deserialize, Serialize};

use parkour_math::Vec3;
use parkour_physics::Character;

use crate::agent::clamp_to_arena;

/// One of the two tag participants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Ai => "AI",
        }
    }
}

/// Notification for UI and recolor collaborators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagEvent {
    GameStarted { it: Side },
    RoleSwapped { new_it: Side },
    GameStopped,
}

/// Tag game tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub capture_radius: f32,
    /// Minimum time between two role swaps (s)
    pub swap_cooldown: f32,
    /// Grace period after the game starts (s)
    pub start_cooldown: f32,
    /// How far the AI is pushed away from the player on a swap
    pub separation_push: f32,
    /// Upward velocity given to the AI when it becomes "it"
    pub hop_velocity: f32,
    /// Width of the square around the player in which the AI spawns
    pub spawn_spread: f32,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            capture_radius: 2.0,
            swap_cooldown: 2.0,
            start_cooldown: 3.0,
            separation_push: 5.0,
            hop_velocity: 8.0,
            spawn_spread: 40.0,
        }
    }
}

/// Owns the "it" role and the swap cooldown
#[derive(Clone, Debug)]
pub struct TagCoordinator {
    config: TagConfig,
    it: Side,
    cooldown: f32,
}

impl TagCoordinator {
    /// Start a game with a fair coin deciding who is "it"
    pub fn start<R: Rng + ?Sized>(config: TagConfig, rng: &mut R) -> Self {
        let it = if rng.gen_bool(0.5) { Side::Player } else { Side::Ai };
        Self::with_it(config, it)
    }

    /// Start a game with a chosen "it" side
    pub fn with_it(config: TagConfig, it: Side) -> Self {
        let cooldown = config.start_cooldown;
        log::info!("Tag game started, {} is it", it.label());
        Self { config, it, cooldown }
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Which side is currently chasing
    pub fn it(&self) -> Side {
        self.it
    }

    /// Seconds until a swap is allowed again
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Count the swap cooldown down by `dt`
    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Swap roles if the AI is within the capture radius and the cooldown has run out
    ///
    /// The separation push never leaves the AI outside ±`arena_half_extent`.
    pub fn try_tag(
        &mut self,
        player: &Character,
        ai: &mut Character,
        arena_half_extent: f32,
    ) -> Option<TagEvent> {
        if self.cooldown > 0.0 {
            return None;
        }
        if ai.position.distance(player.position) >= self.config.capture_radius {
            return None;
        }

        self.it = self.it.other();
        self.cooldown = self.config.swap_cooldown;
        log::info!("Tag! {} is now it", self.it.label());

        let away = (ai.position - player.position).normalized();
        if self.it == Side::Ai {
            ai.velocity.y = self.config.hop_velocity;
            ai.on_ground = false;
        }
        ai.position += away * self.config.separation_push;
        clamp_to_arena(ai, arena_half_extent);

        Some(TagEvent::RoleSwapped { new_it: self.it })
    }

    /// Random spawn point for the AI around the player, at the player's height
    pub fn spawn_point<R: Rng + ?Sized>(&self, player: Vec3, stand_height: f32, rng: &mut R) -> Vec3 {
        let half = self.config.spawn_spread * 0.5;
        let dx = (rng.gen::<f32>() * 2.0 - 1.0) * half;
        let dz = (rng.gen::<f32>() * 2.0 - 1.0) * half;
        Vec3::new(player.x + dx, stand_height, player.z + dz)
    }
}
