//! Scripted player input for the headless runner
//!
//! The driver holds forward, toggles sprint once at the start, then repeats
//! a fixed pattern of jumps, slides and turns. It only talks to the
//! [`IntentController`], the same way a keyboard and mouse would.

use parkour_input::{Control, IntentController};

/// Seconds between jump presses
const JUMP_PERIOD: f32 = 2.5;
/// How long each jump press is held
const JUMP_HOLD: f32 = 0.15;
/// Seconds between slides
const SLIDE_PERIOD: f32 = 4.0;
/// Offset of the slide inside its period
const SLIDE_START: f32 = 1.2;
const SLIDE_HOLD: f32 = 0.7;
/// Seconds between turns
const TURN_PERIOD: f32 = 6.0;
const TURN_START: f32 = 5.0;
/// Mouse units per second while turning
const TURN_RATE: f64 = 400.0;

/// Feeds a fixed input pattern into an [`IntentController`]
#[derive(Debug, Default)]
pub struct DemoDriver {
    elapsed: f32,
    started: bool,
    jump_held: bool,
    slide_held: bool,
}

impl DemoDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of input driven so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Apply this frame's input, then advance the script by `dt`
    pub fn drive(&mut self, input: &mut IntentController, dt: f32) {
        if !self.started {
            input.process_control(Control::Forward, true);
            input.process_control(Control::Sprint, true);
            input.process_control(Control::Sprint, false);
            self.started = true;
        }

        let t = self.elapsed;

        let jump = t % JUMP_PERIOD < JUMP_HOLD;
        if jump != self.jump_held {
            input.process_control(Control::Jump, jump);
            self.jump_held = jump;
        }

        let slide_phase = t % SLIDE_PERIOD;
        let slide = (SLIDE_START..SLIDE_START + SLIDE_HOLD).contains(&slide_phase);
        if slide != self.slide_held {
            input.process_control(Control::Slide, slide);
            self.slide_held = slide;
        }

        if t % TURN_PERIOD >= TURN_START {
            input.process_mouse_motion(TURN_RATE * dt as f64, 0.0);
        }

        self.elapsed += dt;
    }
}
