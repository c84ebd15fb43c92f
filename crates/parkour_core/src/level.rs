//! Level serialization
//!
//! A level is a RON file holding the static shapes, the player spawn and the
//! time-trial courses that run on it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::time_trial::Course;
use parkour_physics::{GeometryRegistry, ShapeDescriptor};

/// A serializable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name (for display/debugging)
    pub name: String,
    /// Player spawn [x, y, z] at eye height
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    /// Static shapes in authoring order
    pub shapes: Vec<ShapeDescriptor>,
    /// Time-trial courses
    #[serde(default)]
    pub courses: Vec<Course>,
}

fn default_spawn() -> [f32; 3] {
    [0.0, 2.0, 0.0]
}

impl Level {
    /// Create a new empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawn: default_spawn(),
            shapes: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Load a level from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a level from RON text
    pub fn from_ron(contents: &str) -> Result<Self, LevelLoadError> {
        let level = ron::from_str(contents)?;
        Ok(level)
    }

    /// Save a level to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelSaveError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Pretty RON text for this level
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty)
    }

    pub fn add_shape(&mut self, shape: ShapeDescriptor) {
        self.shapes.push(shape);
    }

    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn with_spawn(mut self, x: f32, y: f32, z: f32) -> Self {
        self.spawn = [x, y, z];
        self
    }

    /// Build the read-only geometry registry for this level
    pub fn build_registry(&self) -> GeometryRegistry {
        let registry = GeometryRegistry::from_descriptors(&self.shapes);
        log::info!(
            "Level '{}' loaded: {} boxes, {} walls, {} ramps, {} courses",
            self.name,
            registry.collidable_boxes().count() - registry.walls().count(),
            registry.walls().count(),
            registry.ramp_surfaces().count(),
            self.courses.len()
        );
        registry
    }
}

/// Error loading a level
#[derive(Debug)]
pub enum LevelLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LevelLoadError {
    fn from(e: io::Error) -> Self {
        LevelLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelLoadError::Parse(e)
    }
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::Io(e) => write!(f, "IO error: {}", e),
            LevelLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LevelLoadError {}

/// Error saving a level
#[derive(Debug)]
pub enum LevelSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LevelSaveError {
    fn from(e: io::Error) -> Self {
        LevelSaveError::Io(e)
    }
}

impl From<ron::Error> for LevelSaveError {
    fn from(e: ron::Error) -> Self {
        LevelSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LevelSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSaveError::Io(e) => write!(f, "IO error: {}", e),
            LevelSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LevelSaveError {}
