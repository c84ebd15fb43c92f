//! AI behavior controller
//!
//! Each tick the AI picks a movement target from its current mode, steers
//! straight at it with full traction and then runs through the same gravity,
//! height blending and collision resolution as the player. Randomized
//! flourishes are rolled against the [`DecisionTable`](crate::DecisionTable)
//! with an injected random source.

use rand::Rng;

use crate::config::{roll, AiConfig};
use crate::tag::Side;
use crate::targets::{find_parkour_target, ParkourTarget};
use parkour_math::Vec3;
use parkour_physics::{Character, CollisionResolver, GeometryRegistry, MovementConfig, WallRunDetector};

/// High-level AI behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiMode {
    /// Evade the player, who is "it"
    Flee,
    /// Pursue the player while the AI is "it"
    Chase,
    /// Temporary detour to a wall or platform
    Parkour,
}

impl AiMode {
    /// Base mode for the current tag roles
    pub fn for_roles(it: Side) -> Self {
        match it {
            Side::Player => AiMode::Flee,
            Side::Ai => AiMode::Chase,
        }
    }
}

/// Visual hints for a rendering collaborator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseHints {
    /// Yaw the body faces, `atan2(vx, vz)`
    pub facing: f32,
    /// Vertical body scale, 1.0 standing
    pub crouch_scale: f32,
    /// Sideways lean while wall-running (radians)
    pub lean_tilt: f32,
}

impl Default for PoseHints {
    fn default() -> Self {
        Self {
            facing: 0.0,
            crouch_scale: 1.0,
            lean_tilt: 0.0,
        }
    }
}

/// State of one AI-driven character
#[derive(Clone, Debug)]
pub struct AiAgent {
    pub character: Character,
    pub mode: AiMode,
    /// Point the AI currently steers toward
    pub target: Vec3,
    /// Horizontal steering speed
    pub speed: f32,
    pub parkour_target: Option<ParkourTarget>,
    /// Seconds until a fresh flee target is picked
    pub retarget_timer: f32,
    pub jump_cooldown: f32,
    /// Seconds until parkour mode may be entered again
    pub parkour_cooldown: f32,
    /// Seconds left in the current slide
    pub slide_timer: f32,
    /// Outward normal of the wall being run on
    pub wall_normal: Vec3,
    pub pose: PoseHints,
}

impl AiAgent {
    /// A grounded AI standing at `spawn`
    pub fn new(spawn: Vec3, movement: &MovementConfig) -> Self {
        let mut character = Character::new(spawn, movement);
        character.on_ground = true;
        Self {
            character,
            mode: AiMode::Flee,
            target: spawn,
            speed: 0.0,
            parkour_target: None,
            retarget_timer: 0.0,
            jump_cooldown: 0.0,
            parkour_cooldown: 0.0,
            slide_timer: 0.0,
            wall_normal: Vec3::ZERO,
            pose: PoseHints::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.character.position
    }

    fn start_slide(&mut self, duration: f32) {
        log::trace!("AI slide for {:.1}s", duration);
        self.character.is_sliding = true;
        self.slide_timer = duration;
    }

    fn jump(&mut self, velocity: f32, cooldown: f32) {
        self.character.velocity.y = velocity;
        self.character.on_ground = false;
        self.jump_cooldown = cooldown;
    }

    fn set_mode(&mut self, mode: AiMode) {
        if self.mode != mode {
            log::debug!("AI mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

/// Runs AI agents against the static level
#[derive(Clone, Debug, Default)]
pub struct AiController {
    pub config: AiConfig,
    pub movement: MovementConfig,
}

impl AiController {
    pub fn new(config: AiConfig, movement: MovementConfig) -> Self {
        Self { config, movement }
    }

    /// Run one AI tick
    ///
    /// `it` is the side currently chasing. Returns true if the AI fell out
    /// of the world and was respawned.
    pub fn update<R: Rng + ?Sized>(
        &self,
        agent: &mut AiAgent,
        player: Vec3,
        it: Side,
        registry: &GeometryRegistry,
        rng: &mut R,
        dt: f32,
    ) -> bool {
        let config = &self.config;
        let odds = &config.decisions;

        agent.jump_cooldown = (agent.jump_cooldown - dt).max(0.0);
        agent.parkour_cooldown = (agent.parkour_cooldown - dt).max(0.0);
        agent.character.wall_run_cooldown = (agent.character.wall_run_cooldown - dt).max(0.0);

        let on_ground = agent.character.on_ground;
        let to_player = agent.position().distance(player);

        if agent.character.is_sliding {
            agent.slide_timer -= dt;
            if agent.slide_timer <= 0.0 {
                agent.character.is_sliding = false;
            }
        }

        // Launches set their own horizontal velocity and skip steering this tick
        let mut launched = self.update_wall_run_timer(agent, dt);

        if agent.mode != AiMode::Parkour {
            agent.set_mode(AiMode::for_roles(it));
            if on_ground && agent.parkour_cooldown <= 0.0 && roll(rng, odds.parkour_start) {
                if let Some(target) = find_parkour_target(agent.position(), registry, config, rng) {
                    log::debug!("AI parkour target {:?} at {:?}", target.kind, target.position);
                    agent.parkour_target = Some(target);
                    agent.set_mode(AiMode::Parkour);
                }
            }
        }

        match (agent.mode, agent.parkour_target) {
            (AiMode::Parkour, Some(target)) => {
                launched |= self.pursue_parkour(agent, target, it, on_ground, rng);
            }
            (AiMode::Parkour, None) => agent.set_mode(AiMode::for_roles(it)),
            (AiMode::Flee, _) => self.flee(agent, player, to_player, on_ground, rng, dt),
            (AiMode::Chase, _) => self.chase(agent, player, to_player, on_ground, rng),
        }

        if !launched {
            self.steer(agent);
        }

        self.engage_wall_run(agent, registry);

        let character = &mut agent.character;
        if !character.on_ground {
            let gravity = if character.is_wall_running {
                self.movement.wall_run.gravity
            } else {
                self.movement.gravity
            };
            character.velocity.y -= gravity * dt;
        }

        character.blend_height(self.movement.height_blend_rate, dt);
        let resolver = CollisionResolver::new(registry, &self.movement.collision);
        let respawned = resolver.move_and_resolve(character, dt);
        character.settle_contact_state();

        clamp_to_arena(character, config.arena_half_extent);

        self.update_pose(agent, dt);
        respawned
    }

    /// Count wall-run time and kick off the wall once it expires
    ///
    /// Returns true on the kick-off tick.
    fn update_wall_run_timer(&self, agent: &mut AiAgent, dt: f32) -> bool {
        if !agent.character.is_wall_running {
            return false;
        }
        agent.character.wall_run_time += dt;
        if agent.character.wall_run_time <= self.movement.wall_run.max_time {
            return false;
        }

        log::trace!("AI wall-run expired, kicking off");
        let config = &self.config;
        let character = &mut agent.character;
        character.end_wall_run();
        character.velocity.y = config.wall_kick_up;
        character.velocity.x += agent.wall_normal.x * config.wall_kick_out;
        character.velocity.z += agent.wall_normal.z * config.wall_kick_out;
        character.wall_run_cooldown = self.movement.wall_run.reentry_cooldown;
        agent.parkour_cooldown = config.wall_kick_cooldown;
        true
    }

    /// Approach the parkour target and jump at it on arrival
    ///
    /// Returns true if the AI jumped.
    fn pursue_parkour<R: Rng + ?Sized>(
        &self,
        agent: &mut AiAgent,
        target: ParkourTarget,
        it: Side,
        on_ground: bool,
        rng: &mut R,
    ) -> bool {
        let config = &self.config;
        let distance = agent.position().distance(target.position);

        if distance < config.arrival_radius {
            let mut jumped = false;
            if on_ground && agent.jump_cooldown <= 0.0 {
                let toward = (target.position - agent.position()).horizontal().normalized();
                agent.jump(config.parkour_jump, config.parkour_jump_cooldown);
                agent.character.velocity.x = toward.x * config.parkour_boost;
                agent.character.velocity.z = toward.z * config.parkour_boost;
                jumped = true;
            }
            agent.parkour_target = None;
            agent.parkour_cooldown = config.parkour_cooldown;
            agent.set_mode(AiMode::for_roles(it));
            return jumped;
        }

        if distance > config.parkour_abandon {
            log::debug!("AI abandoned parkour target at {:.1} units", distance);
            agent.parkour_target = None;
            agent.set_mode(AiMode::for_roles(it));
            return false;
        }

        agent.target = target.position;
        agent.speed = config.pursuit_speed;
        if distance > config.parkour_slide_min
            && distance < config.parkour_slide_max
            && on_ground
            && !agent.character.is_sliding
            && roll(rng, config.decisions.parkour_slide)
        {
            agent.start_slide(config.parkour_slide_time);
        }
        false
    }

    fn flee<R: Rng + ?Sized>(
        &self,
        agent: &mut AiAgent,
        player: Vec3,
        to_player: f32,
        on_ground: bool,
        rng: &mut R,
        dt: f32,
    ) {
        let config = &self.config;
        let odds = &config.decisions;

        agent.retarget_timer -= dt;
        if agent.retarget_timer <= 0.0
            || agent.target.distance(agent.position()) < config.arrival_radius
        {
            agent.target = self.pick_flee_target(agent.position(), player, rng);
            agent.retarget_timer =
                config.retarget_min + rng.gen::<f32>() * (config.retarget_max - config.retarget_min);
        }

        if to_player < config.panic_radius {
            let away = escape_direction(agent.position(), player, rng);
            agent.target = agent.position() + away * config.panic_flee_distance;
            agent.speed = if agent.character.is_sliding {
                config.slide_speed
            } else {
                config.pursuit_speed
            };

            if to_player < config.panic_slide_radius
                && on_ground
                && !agent.character.is_sliding
                && roll(rng, odds.panic_slide)
            {
                agent.start_slide(config.panic_slide_time);
            }
            if on_ground
                && !agent.character.is_sliding
                && agent.jump_cooldown <= 0.0
                && roll(rng, odds.panic_jump)
            {
                agent.jump(config.panic_jump_velocity, config.panic_jump_cooldown);
            }
        } else {
            agent.speed = config.cruise_speed;

            if on_ground && agent.jump_cooldown <= 0.0 && roll(rng, odds.idle_jump) {
                let velocity = config.idle_jump_min
                    + rng.gen::<f32>() * (config.idle_jump_max - config.idle_jump_min);
                agent.jump(velocity, config.idle_jump_cooldown);
            }
            if on_ground && !agent.character.is_sliding && roll(rng, odds.idle_slide) {
                agent.start_slide(config.idle_slide_time);
            }
        }
    }

    fn chase<R: Rng + ?Sized>(
        &self,
        agent: &mut AiAgent,
        player: Vec3,
        to_player: f32,
        on_ground: bool,
        rng: &mut R,
    ) {
        let config = &self.config;
        let odds = &config.decisions;

        agent.target = player;
        agent.speed = if agent.character.is_sliding {
            config.slide_speed
        } else {
            config.pursuit_speed
        };

        if to_player < config.attack_max
            && to_player > config.attack_min
            && on_ground
            && !agent.character.is_sliding
            && roll(rng, odds.chase_slide)
        {
            agent.start_slide(config.attack_slide_time);
        }
        if on_ground
            && !agent.character.is_sliding
            && agent.jump_cooldown <= 0.0
            && roll(rng, odds.chase_jump)
        {
            agent.jump(config.chase_jump_velocity, config.chase_jump_cooldown);
        }
    }

    /// Fresh flee target away from the player with a random deviation and distance
    pub fn pick_flee_target<R: Rng + ?Sized>(&self, from: Vec3, player: Vec3, rng: &mut R) -> Vec3 {
        let config = &self.config;
        let deviation = (rng.gen::<f32>() - 0.5) * 2.0 * config.flee_deviation;
        let distance = config.flee_min_distance
            + rng.gen::<f32>() * (config.flee_max_distance - config.flee_min_distance);
        let direction = escape_direction(from, player, rng).rotate_y(deviation);

        let bound = config.target_half_extent;
        let mut target = from + direction * distance;
        target.x = target.x.clamp(-bound, bound);
        target.y = self.movement.stand_height;
        target.z = target.z.clamp(-bound, bound);
        target
    }

    /// Set horizontal velocity straight at the target
    fn steer(&self, agent: &mut AiAgent) {
        let flat = (agent.target - agent.position()).horizontal();
        if flat.length() > self.config.steering_deadzone {
            let direction = flat.normalized();
            agent.character.velocity.x = direction.x * agent.speed;
            agent.character.velocity.z = direction.z * agent.speed;
        }
    }

    /// Start a wall-run when airborne and fast beside an authored wall
    fn engage_wall_run(&self, agent: &mut AiAgent, registry: &GeometryRegistry) {
        let character = &mut agent.character;
        if character.on_ground
            || character.is_wall_running
            || character.wall_run_cooldown > 0.0
            || character.horizontal_speed() <= self.movement.wall_run.min_speed
        {
            return;
        }

        let detector = WallRunDetector::new(registry, &self.movement.wall_run);
        if let Some(toward_wall) = detector.probe_cardinal(character, self.config.wall_engage_distance) {
            log::trace!("AI wall-run engaged toward {:?}", toward_wall);
            character.is_wall_running = true;
            character.wall_run_time = 0.0;
            character.velocity.y = character.velocity.y.max(self.config.wall_boost);
            agent.wall_normal = -toward_wall;
        }
    }

    fn update_pose(&self, agent: &mut AiAgent, dt: f32) {
        let config = &self.config;
        let velocity = agent.character.velocity;
        if velocity.x != 0.0 || velocity.z != 0.0 {
            agent.pose.facing = velocity.x.atan2(velocity.z);
        }

        let crouch = if agent.character.is_sliding {
            config.crouch_scale
        } else {
            1.0
        };
        let lean = if agent.character.is_wall_running {
            config.lean_tilt
        } else {
            0.0
        };
        agent.pose.crouch_scale += (crouch - agent.pose.crouch_scale) * (config.crouch_rate * dt).min(1.0);
        agent.pose.lean_tilt += (lean - agent.pose.lean_tilt) * (config.lean_rate * dt).min(1.0);
    }
}

/// Flat unit direction from the player to `from`, random if they coincide
fn escape_direction<R: Rng + ?Sized>(from: Vec3, player: Vec3, rng: &mut R) -> Vec3 {
    let away = (from - player).horizontal().normalized();
    if away.length_squared() > 0.0 {
        away
    } else {
        Vec3::forward_from_yaw(rng.gen::<f32>() * std::f32::consts::TAU)
    }
}

/// Keep a character within ±`bound` on X and Z
pub(crate) fn clamp_to_arena(character: &mut Character, bound: f32) {
    character.position.x = character.position.x.clamp(-bound, bound);
    character.position.z = character.position.z.clamp(-bound, bound);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecisionTable;
    use crate::targets::TargetKind;
    use parkour_physics::ShapeDescriptor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 0.016;
    const EPSILON: f32 = 0.0001;

    fn quiet_decisions() -> DecisionTable {
        DecisionTable {
            parkour_start: 0.0,
            parkour_slide: 0.0,
            panic_slide: 0.0,
            panic_jump: 0.0,
            idle_jump: 0.0,
            idle_slide: 0.0,
            chase_slide: 0.0,
            chase_jump: 0.0,
            platform_preference: 0.0,
        }
    }

    fn controller(decisions: DecisionTable) -> AiController {
        let mut config = AiConfig::default();
        config.decisions = decisions;
        AiController::new(config, MovementConfig::default())
    }

    fn agent_at(x: f32, z: f32) -> AiAgent {
        AiAgent::new(Vec3::new(x, 1.8, z), &MovementConfig::default())
    }

    fn wall_registry() -> GeometryRegistry {
        GeometryRegistry::from_descriptors(&[ShapeDescriptor::Wall {
            position: [10.0, 3.0, 0.0],
            size: [1.0, 6.0, 40.0],
        }])
    }

    #[test]
    fn test_chase_steers_at_player() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(0.0, 0.0);
        let player = Vec3::new(20.0, 1.8, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, player, Side::Ai, &GeometryRegistry::new(), &mut rng, DT);

        assert_eq!(agent.mode, AiMode::Chase);
        assert_eq!(agent.target, player);
        assert!((agent.character.velocity.x - 14.0).abs() < EPSILON);
        assert!(agent.character.velocity.z.abs() < EPSILON);
        assert!(agent.character.on_ground);
    }

    #[test]
    fn test_panic_flee_runs_straight_away() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(0.0, 0.0);
        let player = Vec3::new(5.0, 1.8, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, player, Side::Player, &GeometryRegistry::new(), &mut rng, DT);

        assert_eq!(agent.mode, AiMode::Flee);
        assert!((agent.target.x + 30.0).abs() < EPSILON);
        assert!((agent.character.velocity.x + 14.0).abs() < EPSILON);
    }

    #[test]
    fn test_cruise_flee_target_in_band() {
        let ai = controller(quiet_decisions());
        let player = Vec3::new(100.0, 1.8, 0.0);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let mut agent = agent_at(0.0, 0.0);
            ai.update(&mut agent, player, Side::Player, &GeometryRegistry::new(), &mut rng, DT);

            let offset = (agent.target - Vec3::new(0.0, 1.8, 0.0)).horizontal();
            assert!(offset.length() >= 30.0 - EPSILON && offset.length() <= 50.0 + EPSILON);
            assert!(offset.x <= EPSILON, "target should lie away from the player");
            assert!(agent.retarget_timer >= 2.0 - DT && agent.retarget_timer <= 4.0);
            assert_eq!(agent.speed, 10.0);
        }
    }

    #[test]
    fn test_flee_targets_are_clamped() {
        let ai = controller(quiet_decisions());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let target = ai.pick_flee_target(Vec3::new(135.0, 1.8, -135.0), Vec3::ZERO, &mut rng);
            assert!(target.x <= 140.0 && target.z >= -140.0);
            assert_eq!(target.y, 1.8);
        }
    }

    #[test]
    fn test_coincident_player_still_gets_direction() {
        let mut rng = StdRng::seed_from_u64(2);
        let away = escape_direction(Vec3::ZERO, Vec3::ZERO, &mut rng);
        assert!((away.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_parkour_entry_picks_wall() {
        let mut decisions = quiet_decisions();
        decisions.parkour_start = 1.0;
        let ai = controller(decisions);
        let mut agent = agent_at(-10.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(-100.0, 1.8, 0.0), Side::Player, &wall_registry(), &mut rng, DT);

        assert_eq!(agent.mode, AiMode::Parkour);
        let target = agent.parkour_target.expect("wall within range");
        assert_eq!(target.kind, TargetKind::Wall);
        assert_eq!(agent.speed, 14.0);
        assert!(agent.character.velocity.x > 0.0, "runs toward the wall");
    }

    #[test]
    fn test_parkour_cooldown_blocks_entry() {
        let mut decisions = quiet_decisions();
        decisions.parkour_start = 1.0;
        let ai = controller(decisions);
        let mut agent = agent_at(-10.0, 0.0);
        agent.parkour_cooldown = 1.0;
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(-100.0, 1.8, 0.0), Side::Player, &wall_registry(), &mut rng, DT);

        assert_eq!(agent.mode, AiMode::Flee);
    }

    #[test]
    fn test_parkour_arrival_jumps_at_target() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(8.0, 0.0);
        agent.mode = AiMode::Parkour;
        agent.parkour_target = Some(ParkourTarget {
            position: Vec3::new(10.0, 3.0, 0.0),
            kind: TargetKind::Wall,
        });
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(-100.0, 1.8, 0.0), Side::Player, &wall_registry(), &mut rng, DT);

        let v = agent.character.velocity;
        assert!((v.y - (14.0 - 25.0 * DT)).abs() < 0.001);
        assert!((v.x - 10.0).abs() < EPSILON);
        assert!(!agent.character.on_ground);
        assert_eq!(agent.mode, AiMode::Flee);
        assert!(agent.parkour_target.is_none());
        assert_eq!(agent.parkour_cooldown, 3.0);
        assert_eq!(agent.jump_cooldown, 0.5);
    }

    #[test]
    fn test_parkour_target_abandoned_when_far() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(-60.0, 0.0);
        agent.mode = AiMode::Parkour;
        agent.parkour_target = Some(ParkourTarget {
            position: Vec3::new(10.0, 3.0, 0.0),
            kind: TargetKind::Wall,
        });
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(60.0, 1.8, 0.0), Side::Ai, &wall_registry(), &mut rng, DT);

        assert_eq!(agent.mode, AiMode::Chase);
        assert!(agent.parkour_target.is_none());
        assert_eq!(agent.parkour_cooldown, 0.0, "abandoning has no cooldown");
        assert!(agent.character.velocity.y <= 0.0);
    }

    #[test]
    fn test_airborne_beside_wall_engages_wall_run() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(8.8, 0.0);
        agent.character.position.y = 4.0;
        agent.character.on_ground = false;
        agent.character.velocity.y = -1.0;
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(8.8, 4.0, -100.0), Side::Ai, &wall_registry(), &mut rng, DT);

        assert!(agent.character.is_wall_running);
        assert_eq!(agent.wall_normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((agent.character.velocity.y - (2.0 - 5.0 * DT)).abs() < 0.001);
    }

    #[test]
    fn test_wall_run_expiry_kicks_off_wall() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(8.8, 0.0);
        agent.character.position.y = 4.0;
        agent.character.on_ground = false;
        agent.character.is_wall_running = true;
        agent.character.wall_run_time = 1.49;
        agent.wall_normal = Vec3::new(-1.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(8.8, 4.0, -100.0), Side::Ai, &wall_registry(), &mut rng, 0.02);

        let v = agent.character.velocity;
        assert!(!agent.character.is_wall_running, "kick-off must not re-attach to the same wall");
        assert!((v.y - (12.0 - 25.0 * 0.02)).abs() < 0.001);
        assert!((v.x + 8.0).abs() < EPSILON);
        assert_eq!(agent.parkour_cooldown, 2.0);
        assert!(agent.character.wall_run_cooldown > 0.0);
    }

    #[test]
    fn test_ai_never_leaves_arena() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(144.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            // Player pushes the AI toward the boundary
            let player = agent.position() - Vec3::new(5.0, 0.0, 0.0);
            ai.update(&mut agent, player, Side::Player, &GeometryRegistry::new(), &mut rng, DT);
            assert!(agent.position().x <= 145.0 && agent.position().x >= -145.0);
            assert!(agent.position().z <= 145.0 && agent.position().z >= -145.0);
        }
    }

    #[test]
    fn test_slide_attack_crouches() {
        let mut decisions = quiet_decisions();
        decisions.chase_slide = 1.0;
        let ai = controller(decisions);
        let mut agent = agent_at(0.0, 0.0);
        let player = Vec3::new(6.0, 1.8, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, player, Side::Ai, &GeometryRegistry::new(), &mut rng, DT);
        assert!(agent.character.is_sliding);

        for _ in 0..10 {
            ai.update(&mut agent, player, Side::Ai, &GeometryRegistry::new(), &mut rng, DT);
        }
        assert_eq!(agent.speed, 18.0);
        assert!(agent.pose.crouch_scale < 1.0);
        assert!(agent.character.current_height < agent.character.stand_height);
    }

    #[test]
    fn test_slide_timer_expires() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(0.0, 0.0);
        agent.start_slide(0.1);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            ai.update(&mut agent, Vec3::new(50.0, 1.8, 0.0), Side::Ai, &GeometryRegistry::new(), &mut rng, DT);
        }
        assert!(!agent.character.is_sliding);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let ai = controller(quiet_decisions());
        let mut agent = agent_at(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        ai.update(&mut agent, Vec3::new(20.0, 1.8, 0.0), Side::Ai, &GeometryRegistry::new(), &mut rng, DT);

        assert!((agent.pose.facing - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_same_seed_same_run() {
        let ai = controller(DecisionTable::default());
        let registry = wall_registry();
        let run = |seed: u64| {
            let mut agent = agent_at(-10.0, 5.0);
            let mut rng = StdRng::seed_from_u64(seed);
            for frame in 0..300 {
                let player = Vec3::new((frame as f32 * 0.05).sin() * 10.0, 1.8, 0.0);
                ai.update(&mut agent, player, Side::Player, &registry, &mut rng, DT);
            }
            agent.position()
        };
        assert_eq!(run(21), run(21));
    }
}
