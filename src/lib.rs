//! Dash Parkour - an endless-runner parkour minigame core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, game-over gate)
//! - `tuning`: Data-driven game balance with per-version presets
//! - `hud`: Score display and floating feedback effects
//! - `camera`: Third-person follow rig and world-to-screen projection
//! - `avatar`: Procedural walk-cycle pose for the rigged runner
//! - `input`: Logical action bindings
//! - `session`: Fixed-timestep driver joining everything together

pub mod avatar;
pub mod camera;
pub mod highscores;
pub mod hud;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use tuning::{Preset, Tuning, TuningError};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform sample in `[min, max)`, collapsing to `min` for an empty range
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
