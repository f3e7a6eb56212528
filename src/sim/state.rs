//! Game state and core simulation types
//!
//! `GameState` is the single session context: every component reads and
//! writes through it, and `reset()` produces a fresh run.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::tuning::Tuning;
use crate::uniform;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World advancing, player in control
    Running,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    HitObstacle { id: u32 },
    Fell,
}

/// Things that happened during a step, for presentation layers to consume
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    PickupSpawned { id: u32 },
    PickupCollected { id: u32, points: u32, pos: Vec3 },
    PickupExpired { id: u32 },
    GameOver { cause: GameOverCause, elapsed: f32, score: u64 },
    Restarted { run_index: u32 },
}

/// The runner capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Capsule centre
    pub pos: Vec3,
    pub vel: Vec3,
    pub on_floor: bool,
}

impl Player {
    /// Standing at the origin of the track
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.standing_height(), 0.0),
            vel: Vec3::ZERO,
            on_floor: true,
        }
    }
}

/// A collectible trigger volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec3,
    pub points: u32,
    /// Cleared on the first overlap; never set again
    pub collectible: bool,
    /// Seconds left before an uncollected pickup expires
    pub ttl: f32,
    /// Growth effect progress (0-1) once collected
    pub collect_progress: Option<f32>,
}

impl Pickup {
    /// Mark collected and start the growth effect.
    /// Returns the points earned, or None if already collected.
    pub fn collect(&mut self) -> Option<u32> {
        if !self.collectible {
            return None;
        }
        self.collectible = false;
        self.collect_progress = Some(0.0);
        Some(self.points)
    }

    /// Visual scale during the growth effect
    pub fn display_scale(&self) -> f32 {
        match self.collect_progress {
            Some(p) => 1.0 + 0.6 * p.clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Base seed for the session
    pub seed: u64,
    /// Restarts since the session began (perturbs the run seed)
    pub run_index: u32,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Live pickups (sorted by id for determinism)
    pub pickups: Vec<Pickup>,
    /// Z of the next obstacle; only ever decreases within a run
    pub spawn_cursor: f32,
    /// Seconds until the next pickup spawns
    pub pickup_timer: f32,
    /// Survival time in seconds (accrued by render frames)
    pub elapsed: f32,
    pub score: u64,
    /// Physics step counter
    pub time_ticks: u64,
    pub game_over_cause: Option<GameOverCause>,
    /// Pending events (not part of the snapshot)
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_run(seed, 0, tuning)
    }

    fn with_run(seed: u64, run_index: u32, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(run_seed(seed, run_index));
        let player = Player::spawn(&tuning);
        let spawn_cursor = player.pos.z - tuning.spawn_start_offset;
        let pickup_timer = uniform(
            &mut rng,
            tuning.pickup_interval_min,
            tuning.pickup_interval_max,
        );

        Self {
            seed,
            run_index,
            rng,
            tuning,
            phase: GamePhase::Running,
            player,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            spawn_cursor,
            pickup_timer,
            elapsed: 0.0,
            score: 0,
            time_ticks: 0,
            game_over_cause: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace everything with a fresh run of the same session
    pub fn reset(&mut self) {
        let run_index = self.run_index.wrapping_add(1);
        *self = Self::with_run(self.seed, run_index, self.tuning.clone());
        log::info!("Run {} started", run_index);
        self.push_event(GameEvent::Restarted { run_index });
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.pickups.sort_by_key(|p| p.id);
    }
}

/// Per-run seed so each restart lays out a different course
fn run_seed(seed: u64, run_index: u32) -> u64 {
    seed.wrapping_add((run_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
