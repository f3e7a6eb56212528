//! Dash Parkour headless entry point
//!
//! Runs autopilot sessions at a simulated 60 fps and prints a JSON summary
//! of every run. Rendering hosts embed `dash_parkour::Session` instead.
//!
//! Environment:
//! - `DASH_PARKOUR_SEED`: session seed (default 12345)
//! - `DASH_PARKOUR_PRESET`: `classic` or `parkour`
//! - `DASH_PARKOUR_TUNING`: JSON tuning overrides
//! - `DASH_PARKOUR_RUNS`: number of runs (default 3)

use serde::Serialize;

use dash_parkour::input::{InputState, Key};
use dash_parkour::sim::GamePhase;
use dash_parkour::{Preset, Session, Tuning};

/// Simulated frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest run before the demo stops it (seconds)
const MAX_RUN_SECONDS: f32 = 120.0;

#[derive(Debug, Serialize)]
struct RunSummary {
    run: u32,
    survival: f32,
    score: u64,
    crashed: bool,
    distance: f32,
}

fn load_tuning() -> Tuning {
    let preset = std::env::var("DASH_PARKOUR_PRESET")
        .ok()
        .and_then(|s| Preset::from_str(&s))
        .unwrap_or_default();

    match std::env::var("DASH_PARKOUR_TUNING") {
        Ok(json) => match Tuning::from_json_with_base(&json, Tuning::from_preset(preset)) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring tuning overrides: {}", err);
                Tuning::from_preset(preset)
            }
        },
        Err(_) => Tuning::from_preset(preset),
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    let seed: u64 = env_or("DASH_PARKOUR_SEED", 12345);
    let runs: u32 = env_or("DASH_PARKOUR_RUNS", 3);
    let tuning = load_tuning();
    log::info!(
        "Dash Parkour (headless) starting: seed {}, cap {}, {} runs",
        seed,
        tuning.max_obstacles,
        runs
    );

    let mut session = Session::new(seed, tuning);
    session.autopilot = true;

    let mut summaries = Vec::new();
    let mut input = InputState::new();
    for run in 0..runs {
        while session.state.phase == GamePhase::Running && session.state.elapsed < MAX_RUN_SECONDS {
            session.update(FRAME_DT, &input);
            input.clear_frame_state();
        }

        let state = &session.state;
        summaries.push(RunSummary {
            run,
            survival: state.elapsed,
            score: state.score,
            crashed: state.phase == GamePhase::GameOver,
            distance: -state.player.pos.z,
        });
        for line in session.hud_lines() {
            log::info!("{}", line);
        }

        if session.state.phase == GamePhase::Running {
            log::info!("Run {} reached the time limit; stopping", run);
            break;
        }
        if run + 1 < runs {
            input.press(Key::R);
            session.update(FRAME_DT, &input);
            input.release(Key::R);
            input.clear_frame_state();
        }
    }

    if let Some(best) = session.high_scores.best() {
        log::info!("Best run: #{} with score {}", best.run_index, best.score);
    }
    match serde_json::to_string_pretty(&summaries) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to encode run summary: {}", err),
    }
}
