//! World aggregate
//!
//! The [`World`] owns everything the simulation touches: the read-only
//! geometry registry, the player, the optional tag game with its AI, the
//! running time trial and the random source. One call to [`World::update`]
//! advances all of it by one frame.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::time_trial::{Course, TimeTrial, TrialStatus};
use parkour_ai::{AiAgent, AiConfig, AiController, Side, TagConfig, TagCoordinator, TagEvent};
use parkour_math::Vec3;
use parkour_physics::{
    Character, CharacterController, FrameOutcome, GeometryRegistry, MovementConfig, MovementIntent,
    MovementStatus,
};

/// Tuning shared by every character in a world
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub movement: MovementConfig,
    pub ai: AiConfig,
    pub tag: TagConfig,
}

/// Error from a world command
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// No course exists at this index
    UnknownCourse(usize),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::UnknownCourse(index) => write!(f, "No course at index {}", index),
        }
    }
}

impl std::error::Error for WorldError {}

/// A running tag game
#[derive(Clone, Debug)]
pub struct TagGame {
    pub coordinator: TagCoordinator,
    pub agent: AiAgent,
}

/// What happened during one world update
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub player: FrameOutcome,
    pub tag_event: Option<TagEvent>,
    /// Time-trial progress, if a trial was running this frame
    pub trial: Option<TrialStatus>,
    pub ai_respawned: bool,
}

/// The whole simulation state
pub struct World {
    registry: GeometryRegistry,
    courses: Vec<Course>,
    spawn: Vec3,
    controller: CharacterController,
    ai: AiController,
    tag_config: TagConfig,
    player: Character,
    tag: Option<TagGame>,
    trial: Option<TimeTrial>,
    rng: StdRng,
}

impl World {
    /// Build a world from a level with a seeded random source
    pub fn new(level: &Level, settings: WorldSettings, seed: u64) -> Self {
        Self::with_rng(level, settings, StdRng::seed_from_u64(seed))
    }

    /// Build a world from a level with an explicit random source
    pub fn with_rng(level: &Level, settings: WorldSettings, rng: StdRng) -> Self {
        let registry = level.build_registry();
        let spawn = Vec3::from(level.spawn);
        let player = Character::new(spawn, &settings.movement);
        Self {
            registry,
            courses: level.courses.clone(),
            spawn,
            controller: CharacterController::new(settings.movement.clone()),
            ai: AiController::new(settings.ai, settings.movement),
            tag_config: settings.tag,
            player,
            tag: None,
            trial: None,
            rng,
        }
    }

    pub fn registry(&self) -> &GeometryRegistry {
        &self.registry
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn player_status(&self) -> MovementStatus {
        self.player.status()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn tag_game(&self) -> Option<&TagGame> {
        self.tag.as_ref()
    }

    pub fn tag_game_mut(&mut self) -> Option<&mut TagGame> {
        self.tag.as_mut()
    }

    pub fn ai(&self) -> Option<&AiAgent> {
        self.tag.as_ref().map(|game| &game.agent)
    }

    pub fn time_trial(&self) -> Option<&TimeTrial> {
        self.trial.as_ref()
    }

    /// Advance the world by one frame
    ///
    /// The caller clamps `dt` before it gets here.
    pub fn update(&mut self, intent: &MovementIntent, dt: f32) -> FrameReport {
        let player = self
            .controller
            .update(&mut self.player, intent, &self.registry, dt);

        let mut report = FrameReport {
            player,
            ..Default::default()
        };

        if let Some(game) = self.tag.as_mut() {
            game.coordinator.tick(dt);
            report.ai_respawned = self.ai.update(
                &mut game.agent,
                self.player.position,
                game.coordinator.it(),
                &self.registry,
                &mut self.rng,
                dt,
            );
            report.tag_event = game.coordinator.try_tag(
                &self.player,
                &mut game.agent.character,
                self.ai.config.arena_half_extent,
            );
        }

        if let Some(trial) = self.trial.as_mut() {
            let status = trial.update(self.player.position, dt);
            if status.is_finished() {
                self.trial = None;
            }
            report.trial = Some(status);
        }

        report
    }

    /// Start a tag game, spawning the AI near the player
    ///
    /// A fair coin decides who is "it". A game already in progress is replaced.
    pub fn start_tag_game(&mut self) -> TagEvent {
        let coordinator = TagCoordinator::start(self.tag_config.clone(), &mut self.rng);
        self.begin_tag_game(coordinator)
    }

    /// Start a tag game with a chosen "it" side
    pub fn start_tag_game_with(&mut self, it: Side) -> TagEvent {
        let coordinator = TagCoordinator::with_it(self.tag_config.clone(), it);
        self.begin_tag_game(coordinator)
    }

    fn begin_tag_game(&mut self, coordinator: TagCoordinator) -> TagEvent {
        let spawn = coordinator.spawn_point(
            self.player.position,
            self.ai.movement.stand_height,
            &mut self.rng,
        );
        let it = coordinator.it();
        self.tag = Some(TagGame {
            coordinator,
            agent: AiAgent::new(spawn, &self.ai.movement),
        });
        TagEvent::GameStarted { it }
    }

    /// Stop the tag game and remove the AI
    pub fn stop_tag_game(&mut self) -> Option<TagEvent> {
        self.tag.take().map(|_| {
            log::info!("Tag game stopped");
            TagEvent::GameStopped
        })
    }

    /// Teleport the player to a course start and start its clock
    pub fn start_course(&mut self, index: usize) -> Result<(), WorldError> {
        let course = self
            .courses
            .get(index)
            .cloned()
            .ok_or(WorldError::UnknownCourse(index))?;
        self.player.teleport_to(course.start_point());
        self.trial = Some(TimeTrial::new(course));
        Ok(())
    }

    /// Abandon the running course and return to the level spawn
    pub fn exit_course(&mut self) {
        if let Some(trial) = self.trial.take() {
            log::info!("Left time trial '{}'", trial.course().name);
        }
        self.player.teleport_to(self.spawn);
    }

    /// Move the player and stop it
    pub fn teleport_player(&mut self, position: Vec3) {
        self.player.teleport_to(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkour_physics::ShapeDescriptor;

    const DT: f32 = 1.0 / 60.0;

    fn level() -> Level {
        let mut level = Level::new("Test").with_spawn(0.0, 1.8, 0.0);
        level.add_shape(ShapeDescriptor::Box {
            position: [0.0, 0.5, 20.0],
            size: [4.0, 1.0, 4.0],
        });
        level.add_course(Course {
            name: "Sprint".to_string(),
            description: String::new(),
            start: [0.0, 1.8, 0.0],
            goal: [0.0, 1.8, -30.0],
            goal_radius: 2.5,
            time_limit: 10.0,
        });
        level
    }

    #[test]
    fn test_player_settles_on_ground() {
        let mut world = World::new(&level(), WorldSettings::default(), 1);
        for _ in 0..10 {
            world.update(&MovementIntent::idle(0.0), DT);
        }
        assert!(world.player().on_ground);
        assert_eq!(world.player_status(), MovementStatus::Grounded);
    }

    #[test]
    fn test_start_and_stop_tag_game() {
        let mut world = World::new(&level(), WorldSettings::default(), 1);
        assert!(world.ai().is_none());

        let event = world.start_tag_game();
        assert!(matches!(event, TagEvent::GameStarted { .. }));
        let ai = world.ai().expect("AI spawned");
        assert!((ai.position().x).abs() <= 20.0 && (ai.position().z).abs() <= 20.0);
        assert_eq!(world.tag_game().unwrap().coordinator.cooldown(), 3.0);

        assert_eq!(world.stop_tag_game(), Some(TagEvent::GameStopped));
        assert!(world.ai().is_none());
        assert_eq!(world.stop_tag_game(), None);
    }

    #[test]
    fn test_unknown_course_is_error() {
        let mut world = World::new(&level(), WorldSettings::default(), 1);
        assert_eq!(world.start_course(3), Err(WorldError::UnknownCourse(3)));
        assert!(world.time_trial().is_none());
    }

    #[test]
    fn test_course_runs_to_goal() {
        let mut world = World::new(&level(), WorldSettings::default(), 1);
        world.start_course(0).unwrap();
        assert!(world.time_trial().is_some());

        let forward = MovementIntent {
            forward: 1.0,
            ..MovementIntent::idle(0.0)
        };
        let mut result = None;
        for _ in 0..600 {
            if let Some(status) = world.update(&forward, DT).trial {
                if status.is_finished() {
                    result = Some(status);
                    break;
                }
            }
        }

        assert!(matches!(result, Some(TrialStatus::Succeeded { .. })), "got {:?}", result);
        assert!(world.time_trial().is_none(), "finished trials are cleared");
    }

    #[test]
    fn test_exit_course_returns_to_spawn() {
        let mut world = World::new(&level(), WorldSettings::default(), 1);
        world.start_course(0).unwrap();
        world.teleport_player(Vec3::new(50.0, 5.0, 50.0));
        world.exit_course();
        assert!(world.time_trial().is_none());
        assert_eq!(world.player().position, Vec3::new(0.0, 1.8, 0.0));
        assert_eq!(world.player().velocity, Vec3::ZERO);
    }
}
