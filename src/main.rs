//! Parkour tag - headless runner
//!
//! Loads the configured level, optionally starts a time trial and a tag game,
//! then steps the simulation at a fixed rate with scripted input and logs
//! what happens.

use std::process::ExitCode;

use parkour::config::AppConfig;
use parkour::systems::{DemoDriver, SimulationSystem};
use parkour_core::{format_time, Level, LevelValidator, TagEvent, TrialStatus, World};
use parkour_input::IntentController;

fn main() -> ExitCode {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting parkour");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), String> {
    let level = Level::load(&config.scene.path)
        .map_err(|e| format!("Failed to load level '{}': {}", config.scene.path, e))?;

    if let Err(errors) = LevelValidator::validate_or_error(&level) {
        for error in &errors {
            log::error!("Level '{}': {}", level.name, error);
        }
        return Err(format!("Level '{}' failed validation", level.name));
    }

    let sim_config = &config.simulation;
    if sim_config.fixed_dt.is_nan() || sim_config.fixed_dt <= 0.0 {
        return Err(format!("simulation.fixed_dt must be positive, got {}", sim_config.fixed_dt));
    }

    let mut world = World::new(&level, config.world_settings(), sim_config.seed);

    if let Some(index) = sim_config.course {
        world.start_course(index).map_err(|e| e.to_string())?;
    }
    if sim_config.start_tag_game {
        world.start_tag_game();
    }

    let mut input = IntentController::new()
        .with_mouse_sensitivity(config.input.mouse_sensitivity)
        .with_pitch_limit(config.input.pitch_limit.to_radians());
    let mut driver = DemoDriver::new();
    let mut simulation = SimulationSystem::new(sim_config.max_delta);

    let frames = (sim_config.duration_secs / sim_config.fixed_dt).ceil() as u64;
    let mut next_status = 0.0;
    let mut swaps = 0u32;
    let mut respawns = 0u32;

    for _ in 0..frames {
        driver.drive(&mut input, sim_config.fixed_dt);
        let report = simulation.step(&mut world, &mut input, sim_config.fixed_dt);

        if let Some(TagEvent::RoleSwapped { .. }) = report.tag_event {
            swaps += 1;
        }
        if report.player.respawned || report.ai_respawned {
            respawns += 1;
        }
        match report.trial {
            Some(TrialStatus::Succeeded { time }) => {
                log::info!("Course finished in {}", format_time(time));
            }
            Some(TrialStatus::Failed) => log::info!("Course failed"),
            _ => {}
        }

        if simulation.elapsed() >= next_status {
            log_status(&world, simulation.elapsed());
            next_status += sim_config.status_interval.max(sim_config.fixed_dt);
        }
    }

    world.stop_tag_game();
    log::info!(
        "Simulated {:.1}s: {} role swaps, {} respawns",
        simulation.elapsed(),
        swaps,
        respawns
    );
    Ok(())
}

fn log_status(world: &World, elapsed: f32) {
    let player = world.player();
    let p = player.position;
    let mut line = format!(
        "[{}] player ({:.1}, {:.1}, {:.1}) {:.1} m/s {}",
        format_time(elapsed),
        p.x,
        p.y,
        p.z,
        player.horizontal_speed(),
        world.player_status().label()
    );

    if let Some(game) = world.tag_game() {
        let ai = &game.agent;
        line.push_str(&format!(
            " | AI {:?} {:.1} m away, {} is it",
            ai.mode,
            ai.position().distance(p),
            game.coordinator.it().label()
        ));
    }
    if let Some(trial) = world.time_trial() {
        let remaining = trial.course().time_limit - trial.elapsed();
        line.push_str(&format!(" | {} left", format_time(remaining)));
    }

    log::info!("{}", line);
}
