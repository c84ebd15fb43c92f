//! Level validation
//!
//! Authoring-time checks run before a level is turned into a geometry
//! registry. The simulation itself assumes well-formed geometry, so the
//! [`LevelValidator`] is where empty levels, degenerate shapes, broken
//! courses and extreme spawn points get caught.

use std::collections::HashSet;

use crate::level::Level;
use parkour_physics::ShapeDescriptor;

/// Coordinates beyond this magnitude are treated as authoring mistakes
const EXTREME_COORDINATE: f32 = 10000.0;

/// Validation error found in a level
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Level has no shapes
    EmptyLevel,
    /// Box or wall with a non-positive size component (shape index)
    DegenerateBox(usize),
    /// Ramp with a non-positive width, height or depth (shape index)
    DegenerateRamp(usize),
    /// Shape with a NaN or infinite value (shape index)
    NonFiniteShape(usize),
    /// Two courses share a name
    DuplicateCourse(String),
    /// Course goal radius is not positive
    InvalidGoalRadius(String),
    /// Course time limit is not positive
    InvalidTimeLimit(String),
    /// Spawn point is at extreme coordinates
    ExtremeSpawnPosition([f32; 3]),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyLevel => write!(f, "Level has no shapes"),
            ValidationError::DegenerateBox(i) => {
                write!(f, "Shape {} is a box with a non-positive size", i)
            }
            ValidationError::DegenerateRamp(i) => {
                write!(f, "Shape {} is a ramp with non-positive dimensions", i)
            }
            ValidationError::NonFiniteShape(i) => {
                write!(f, "Shape {} has a non-finite value", i)
            }
            ValidationError::DuplicateCourse(name) => {
                write!(f, "Duplicate course name: '{}'", name)
            }
            ValidationError::InvalidGoalRadius(name) => {
                write!(f, "Course '{}' has a non-positive goal radius", name)
            }
            ValidationError::InvalidTimeLimit(name) => {
                write!(f, "Course '{}' has a non-positive time limit", name)
            }
            ValidationError::ExtremeSpawnPosition(pos) => {
                write!(
                    f,
                    "Extreme spawn position: [{}, {}, {}] (component abs > {})",
                    pos[0], pos[1], pos[2], EXTREME_COORDINATE
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Level validator that checks for common authoring errors
pub struct LevelValidator;

impl LevelValidator {
    /// Validate a level, returning all errors found
    pub fn validate(level: &Level) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if level.shapes.is_empty() {
            errors.push(ValidationError::EmptyLevel);
        }

        for (index, shape) in level.shapes.iter().enumerate() {
            if let Some(error) = Self::check_shape(index, shape) {
                errors.push(error);
            }
        }

        let mut seen_names = HashSet::new();
        for course in &level.courses {
            if !seen_names.insert(course.name.as_str()) {
                errors.push(ValidationError::DuplicateCourse(course.name.clone()));
            }
            if course.goal_radius.is_nan() || course.goal_radius <= 0.0 {
                errors.push(ValidationError::InvalidGoalRadius(course.name.clone()));
            }
            if course.time_limit.is_nan() || course.time_limit <= 0.0 {
                errors.push(ValidationError::InvalidTimeLimit(course.name.clone()));
            }
        }

        if level.spawn.iter().any(|c| c.abs() > EXTREME_COORDINATE) {
            errors.push(ValidationError::ExtremeSpawnPosition(level.spawn));
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(level: &Level) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(level);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_shape(index: usize, shape: &ShapeDescriptor) -> Option<ValidationError> {
        match *shape {
            ShapeDescriptor::Box { position, size } | ShapeDescriptor::Wall { position, size } => {
                if position.iter().chain(size.iter()).any(|v| !v.is_finite()) {
                    Some(ValidationError::NonFiniteShape(index))
                } else if size.iter().any(|s| *s <= 0.0) {
                    Some(ValidationError::DegenerateBox(index))
                } else {
                    None
                }
            }
            ShapeDescriptor::Ramp {
                position,
                width,
                height,
                depth,
                rotation,
            } => {
                let dims = [width, height, depth];
                if position.iter().chain(dims.iter()).any(|v| !v.is_finite()) || !rotation.is_finite() {
                    Some(ValidationError::NonFiniteShape(index))
                } else if dims.iter().any(|d| *d <= 0.0) {
                    Some(ValidationError::DegenerateRamp(index))
                } else {
                    None
                }
            }
        }
    }
}
