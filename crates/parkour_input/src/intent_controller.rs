//! Intent controller for first-person parkour input
//!
//! Controls:
//! - Forward/Backward/Left/Right: directional intent
//! - Jump: buffered until the controller consumes it or the control is released
//! - Slide: held
//! - Sprint: each press toggles sprinting
//! - Mouse motion: yaw and clamped pitch

use parkour_physics::MovementIntent;

/// Abstract controls a front end maps its keys onto
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Slide,
    Sprint,
}

/// Accumulates input events into a [`MovementIntent`]
pub struct IntentController {
    // Held movement controls
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    slide: bool,

    // Edge-triggered state
    jump_pending: bool,
    sprint_toggled: bool,

    yaw: f32,
    pitch: f32,

    // Configuration
    pub mouse_sensitivity: f32,
    /// Maximum look angle above or below the horizon (radians)
    pub pitch_limit: f32,
}

impl Default for IntentController {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            slide: false,

            jump_pending: false,
            sprint_toggled: false,

            yaw: 0.0,
            pitch: 0.0,

            mouse_sensitivity: 0.002,
            pitch_limit: std::f32::consts::FRAC_PI_2,
        }
    }

    /// Process a control press or release
    ///
    /// Returns true if the control changed any state.
    pub fn process_control(&mut self, control: Control, pressed: bool) -> bool {
        match control {
            Control::Forward => self.forward = pressed,
            Control::Backward => self.backward = pressed,
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Slide => self.slide = pressed,
            Control::Jump => self.jump_pending = pressed,
            Control::Sprint => {
                if !pressed {
                    return false;
                }
                self.sprint_toggled = !self.sprint_toggled;
            }
        }
        true
    }

    /// Process mouse movement in device units
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.yaw -= delta_x as f32 * self.mouse_sensitivity;
        self.pitch -= delta_y as f32 * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Build this frame's intent
    ///
    /// The sprint toggle is an edge and is cleared here; the jump request
    /// stays pending until [`consume_jump`](Self::consume_jump).
    pub fn intent(&mut self) -> MovementIntent {
        let (forward, right) = self.get_movement_input();
        let sprint_toggled = std::mem::take(&mut self.sprint_toggled);
        MovementIntent {
            forward,
            right,
            jump: self.jump_pending,
            slide: self.slide,
            sprint_toggled,
            yaw: self.yaw,
        }
    }

    /// Consume the jump request
    ///
    /// Returns true if a jump was pending, then clears it.
    pub fn consume_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }

    /// Get raw movement input as (forward, right) in -1.0..=1.0
    pub fn get_movement_input(&self) -> (f32, f32) {
        let forward = (self.forward as i32 - self.backward as i32) as f32;
        let right = (self.right as i32 - self.left as i32) as f32;
        (forward, right)
    }

    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Point the view straight ahead along `yaw`
    pub fn reset_look(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.pitch = 0.0;
    }

    /// Release every held control and drop pending edges
    pub fn clear(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.slide = false;
        self.jump_pending = false;
        self.sprint_toggled = false;
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set the pitch limit in radians
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit;
        self
    }
}
