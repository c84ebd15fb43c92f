//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PARKOUR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use parkour_ai::{AiConfig, TagConfig};
use parkour_core::WorldSettings;
use parkour_physics::MovementConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame stepping and run setup
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Character movement tuning, shared by the player and the AI
    #[serde(default)]
    pub movement: MovementConfig,
    /// AI opponent tuning and decision probabilities
    #[serde(default)]
    pub ai: AiConfig,
    /// Tag game rules
    #[serde(default)]
    pub tag: TagConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Level selection
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PARKOUR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PARKOUR_MOVEMENT__GRAVITY=30 -> movement.gravity = 30.0
        figment = figment.merge(Env::prefixed("PARKOUR_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Tuning handed to the world
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            movement: self.movement.clone(),
            ai: self.ai.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// Frame stepping and run setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Largest frame delta fed to the simulation (seconds)
    pub max_delta: f32,
    /// Step used by the headless runner (seconds)
    pub fixed_dt: f32,
    /// How long the headless runner simulates (seconds)
    pub duration_secs: f32,
    /// Seed for the world's random source
    pub seed: u64,
    /// Start a tag game against the AI on launch
    pub start_tag_game: bool,
    /// Course index to run on launch
    pub course: Option<usize>,
    /// Seconds between status lines
    pub status_interval: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            fixed_dt: 1.0 / 60.0,
            duration_secs: 30.0,
            seed: 0,
            start_tag_game: true,
            course: None,
            status_interval: 1.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of yaw/pitch per unit of mouse motion
    pub mouse_sensitivity: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            pitch_limit: 90.0,
        }
    }
}

/// Level selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the level RON file
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/playground.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.max_delta, 0.1);
        assert_eq!(config.movement.gravity, 25.0);
        assert_eq!(config.tag.capture_radius, 2.0);
        assert_eq!(config.scene.path, "scenes/playground.ron");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[movement.wall_run]"));
        assert!(toml.contains("[ai.decisions]"));
        assert!(toml.contains("capture_radius"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[movement]\ngravity = 30.0\n[ai.decisions]\nparkour_start = 0.0\n"))
            .extract()
            .unwrap();
        assert_eq!(config.movement.gravity, 30.0);
        assert_eq!(config.movement.jump_force, 12.0);
        assert_eq!(config.ai.decisions.parkour_start, 0.0);
        assert_eq!(config.ai.decisions.chase_jump, 0.04);
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let result: Result<AppConfig, ConfigError> = Figment::new()
            .merge(Toml::string("[simulation]\nseed = \"abc\"\n"))
            .extract()
            .map_err(ConfigError::from);
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_world_settings_mirror_sections() {
        let mut config = AppConfig::default();
        config.tag.swap_cooldown = 4.0;
        assert_eq!(config.world_settings().tag.swap_cooldown, 4.0);
    }
}
