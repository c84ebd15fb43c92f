//! Time-trial courses
//!
//! A course is a start point, a goal zone and a time limit. The trial only
//! reads the player's position; the world teleports the player to the start.

use serde::{Deserialize, Serialize};

use parkour_math::Vec3;

/// Extra reach added to the goal radius when checking arrival
const GOAL_REACH: f32 = 1.0;

/// A time-trial course authored in a level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Player start [x, y, z] at eye height
    pub start: [f32; 3],
    /// Goal center [x, y, z]
    pub goal: [f32; 3],
    pub goal_radius: f32,
    /// Seconds allowed to reach the goal
    pub time_limit: f32,
}

impl Course {
    pub fn start_point(&self) -> Vec3 {
        self.start.into()
    }

    pub fn goal_point(&self) -> Vec3 {
        self.goal.into()
    }

    /// Whether `position` is inside the goal zone
    pub fn reached(&self, position: Vec3) -> bool {
        position.distance(self.goal_point()) < self.goal_radius + GOAL_REACH
    }
}

/// Progress of a running trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialStatus {
    Running { remaining: f32 },
    Succeeded { time: f32 },
    Failed,
}

impl TrialStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, TrialStatus::Running { .. })
    }
}

/// A running attempt at one course
#[derive(Debug, Clone)]
pub struct TimeTrial {
    course: Course,
    elapsed: f32,
}

impl TimeTrial {
    pub fn new(course: Course) -> Self {
        log::info!("Time trial '{}' started ({:.0}s)", course.name, course.time_limit);
        Self {
            course,
            elapsed: 0.0,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the clock and check the goal
    ///
    /// Reaching the goal wins even on the frame the clock runs out.
    pub fn update(&mut self, player: Vec3, dt: f32) -> TrialStatus {
        self.elapsed += dt;

        if self.course.reached(player) {
            log::info!("Time trial '{}' complete in {:.2}s", self.course.name, self.elapsed);
            return TrialStatus::Succeeded { time: self.elapsed };
        }
        if self.elapsed >= self.course.time_limit {
            log::info!("Time trial '{}' failed: out of time", self.course.name);
            return TrialStatus::Failed;
        }
        TrialStatus::Running {
            remaining: (self.course.time_limit - self.elapsed).max(0.0),
        }
    }
}

/// Format seconds as `MM:SS.cc` for a timer display
pub fn format_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u32;
    let whole = (seconds % 60.0).floor() as u32;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u32;
    format!("{:02}:{:02}.{:02}", minutes, whole, hundredths)
}
