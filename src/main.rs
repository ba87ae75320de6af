//! Grove Dash headless runner
//!
//! Plays the level with a simple autopilot and prints the final HUD as JSON.
//!
//! Usage: `grove-dash [level.json] [settings.json]`

use grove_dash::Settings;
use grove_dash::consts::*;
use grove_dash::sim::{FixedStepClock, GameEvent, GameState, LevelConfig, TickInput, tick};

/// Give up after this many simulated seconds
const MAX_SECONDS: u32 = 180;

/// Host frame times to cycle through (a jittery ~60 Hz display)
const HOST_FRAMES: [f32; 3] = [0.016, 0.017, 0.0175];

fn load_level(path: Option<&str>) -> LevelConfig {
    let Some(path) = path else {
        return LevelConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match LevelConfig::from_json(&json) {
            Ok(level) => {
                log::info!("Loaded level from {}", path);
                level
            }
            Err(e) => {
                log::error!("Bad level file {}: {}", path, e);
                LevelConfig::default()
            }
        },
        Err(e) => {
            log::error!("Cannot read {}: {}", path, e);
            LevelConfig::default()
        }
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    path.and_then(|path| {
        std::fs::read_to_string(path)
            .map_err(|e| log::error!("Cannot read {}: {}", path, e))
            .ok()
    })
    .and_then(|json| {
        Settings::from_json(&json)
            .map_err(|e| log::error!("Bad settings: {}", e))
            .ok()
    })
    .unwrap_or_default()
}

/// Run right, hop over anything in the way
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let ahead = player.body.pos.x + player.body.size.x;
    let threat = state
        .enemies
        .iter()
        .filter(|e| !e.defeated)
        .map(|e| e.body.pos.x)
        .chain(state.boss.iter().filter(|b| !b.defeated).map(|b| b.body.pos.x))
        .any(|x| x > ahead && x - ahead < 90.0);
    let gap = player.grounded
        && state
            .platforms
            .support_under(ahead + 20.0, player.body.bottom())
            .is_none();

    TickInput {
        left: false,
        right: true,
        jump: threat || gap || (state.frame % 90 < 20 && !player.grounded),
    }
}

fn main() {
    env_logger::init();
    log::info!("Grove Dash (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let level = load_level(args.get(1).map(String::as_str));
    let settings = load_settings(args.get(2).map(String::as_str));
    let seed = 0x5EED_u64;

    let mut state = GameState::new(&level, seed, &settings);
    let mut clock = FixedStepClock::new();
    let mut host_frame = 0usize;

    while !state.phase().is_terminal() && state.frame < u64::from(MAX_SECONDS * SIM_HZ) {
        let elapsed = HOST_FRAMES[host_frame % HOST_FRAMES.len()];
        host_frame += 1;

        for _ in 0..clock.advance(elapsed) {
            let input = autopilot(&state);
            tick(&mut state, &input);
            for event in &state.events {
                match event {
                    GameEvent::PlayerDied { lives_left } => {
                        log::info!("Frame {}: died, {} lives left", state.frame, lives_left)
                    }
                    GameEvent::BossPhaseChanged { phase } => {
                        log::info!("Frame {}: boss now in {:?}", state.frame, phase)
                    }
                    other => log::debug!("Frame {}: {:?}", state.frame, other),
                }
            }
        }
    }

    log::info!(
        "Finished after {} ticks ({} host frames)",
        state.frame,
        host_frame
    );
    match serde_json::to_string_pretty(&state.hud()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode HUD: {}", e),
    }
}
