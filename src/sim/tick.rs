//! Fixed timestep physics step and variable-rate render frame
//!
//! Step order: movement, contact inspection, pickups, then spawning and
//! sweeping. Contacts are always checked against the obstacles that existed
//! when the player moved.

use super::collision::capsule_sphere_overlap;
use super::gate::check_fatal;
use super::player::{player_capsule, step_player};
use super::spawn::{expire_pickups, fill_obstacle_horizon, update_pickup_timer};
use super::state::{GameEvent, GamePhase, GameState};
use super::sweep::sweep_behind;

/// Input commands for a single physics step (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering axis in [-1, 1] (negative = left)
    pub lateral: f32,
    /// Jump (only acts on the floor)
    pub jump: bool,
    /// Restart (only acts after game over)
    pub restart: bool,
    /// Demo mode - the simulation steers itself
    pub autopilot: bool,
}

/// Advance the game state by one physics step
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.reset();
        }
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    state.time_ticks += 1;

    // Movement and contacts
    let result = step_player(
        &mut state.player,
        input.lateral,
        input.jump,
        &state.obstacles,
        &state.tuning,
        dt,
    );
    if check_fatal(state, result.hit_obstacle) {
        return;
    }

    collect_overlapping_pickups(state);

    // World progression
    expire_pickups(state, dt);
    update_pickup_timer(state, dt);
    let spawned = fill_obstacle_horizon(state);
    if spawned > 0 {
        log::debug!(
            "Horizon filled: {} new, {} live, cursor z={:.1}",
            spawned,
            state.obstacles.len(),
            state.spawn_cursor
        );
    }
    sweep_behind(state);

    state.normalize_order();
}

/// Score every collectible pickup the runner overlaps.
/// Returns the ids collected this step.
pub fn collect_overlapping_pickups(state: &mut GameState) -> Vec<u32> {
    let capsule = player_capsule(&state.player, &state.tuning);
    let radius = state.tuning.pickup_radius;

    let mut collected = Vec::new();
    for pickup in &mut state.pickups {
        if !pickup.collectible || !capsule_sphere_overlap(&capsule, pickup.pos, radius) {
            continue;
        }
        if let Some(points) = pickup.collect() {
            collected.push((pickup.id, points, pickup.pos));
        }
    }

    let mut ids = Vec::with_capacity(collected.len());
    for (id, points, pos) in collected {
        state.score += points as u64;
        state.push_event(GameEvent::PickupCollected { id, points, pos });
        ids.push(id);
    }
    ids
}

/// Advance one render frame: survival time and cosmetic animation
pub fn advance_frame(state: &mut GameState, dt: f32) {
    if state.phase == GamePhase::Running {
        state.elapsed += dt;
    }

    for obstacle in &mut state.obstacles {
        obstacle.animate(dt);
    }

    // Collected pickups grow, then disappear
    let step = dt / state.tuning.pickup_collect_duration;
    state.pickups.retain_mut(|p| match p.collect_progress.as_mut() {
        Some(progress) => {
            *progress = (*progress + step).min(1.0);
            *progress < 1.0
        }
        None => true,
    });
}

/// Steer around the nearest blocking obstacle, otherwise drift toward the
/// nearest pickup, otherwise return to the centre line
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = state.player.pos;
    let clearance = state.tuning.player_radius + 0.4;
    let look_ahead = state.tuning.run_speed * 1.2;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            let dz = player.z - o.pos.z;
            let aabb = o.aabb();
            dz > -aabb.half_extents.z
                && dz < look_ahead
                && (o.pos.x - player.x).abs() < aabb.half_extents.x + clearance
        })
        .min_by(|a, b| {
            b.pos
                .z
                .partial_cmp(&a.pos.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let bound = state.tuning.lateral_bound;
    let target_x = if let Some(o) = threat {
        let reach = o.aabb().half_extents.x + clearance + 0.2;
        let left = o.pos.x - reach;
        let right = o.pos.x + reach;
        // Take the side that stays on the track and needs less travel
        match (left >= -bound, right <= bound) {
            (true, true) => {
                if (player.x - left).abs() <= (player.x - right).abs() {
                    left
                } else {
                    right
                }
            }
            (true, false) => left,
            (false, true) => right,
            (false, false) => player.x,
        }
    } else {
        state
            .pickups
            .iter()
            .filter(|p| p.collectible && p.pos.z < player.z)
            .max_by(|a, b| {
                a.pos
                    .z
                    .partial_cmp(&b.pos.z)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.pos.x)
            .unwrap_or(0.0)
    };

    input.lateral = ((target_x - player.x) * 2.0).clamp(-1.0, 1.0);
}
