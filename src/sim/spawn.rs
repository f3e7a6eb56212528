//! Obstacle horizon and pickup timer
//!
//! Obstacles are laid out ahead of the player at a cursor that walks toward
//! -Z by a random gap per obstacle, until either the live cap is reached or
//! the cursor is a full horizon ahead. Pickups run on their own one-shot
//! timer that is re-rolled every time it fires.

use glam::Vec3;
use rand::Rng;

use super::obstacle::build_obstacle;
use super::state::{GameEvent, GameState, Pickup};
use crate::tuning::Tuning;
use crate::{lerp, uniform};

/// Lane-biased lateral placement.
///
/// The lane centre is pulled from a random position toward the player's
/// clamped lateral position; the final position is sampled in a band around
/// that centre, widening to the full range if clamping squeezes the band.
pub fn biased_lateral<R: Rng + ?Sized>(rng: &mut R, player_x: f32, tuning: &Tuning) -> f32 {
    let bound = tuning.lateral_bound;
    let random_x = uniform(rng, -bound, bound);
    let player_x = player_x.clamp(-bound, bound);
    let lane = lerp(random_x, player_x, tuning.lane_follow_weight);

    let mut lo = (lane - tuning.lane_band_half_width).max(-bound);
    let mut hi = (lane + tuning.lane_band_half_width).min(bound);
    if hi - lo < tuning.lane_min_band_width {
        lo = -bound;
        hi = bound;
    }
    uniform(rng, lo, hi)
}

/// Fill the obstacle horizon. Returns how many obstacles were created.
pub fn fill_obstacle_horizon(state: &mut GameState) -> usize {
    let player = state.player.pos;
    let horizon_edge = player.z - state.tuning.spawn_horizon;

    // Never place the next obstacle inside the start offset; covers the cap
    // holding the cursor back while the player ran past it
    state.spawn_cursor = state
        .spawn_cursor
        .min(player.z - state.tuning.spawn_start_offset);

    let mut spawned = 0;
    while state.obstacles.len() < state.tuning.max_obstacles && state.spawn_cursor > horizon_edge {
        let id = state.next_entity_id();
        let x = biased_lateral(&mut state.rng, player.x, &state.tuning);
        let obstacle = build_obstacle(id, x, state.spawn_cursor, &mut state.rng, &state.tuning);
        log::debug!(
            "Spawned {} #{} at x={:.2} z={:.2} (half-size {:.2})",
            obstacle.archetype.name(),
            id,
            x,
            state.spawn_cursor,
            obstacle.half_size
        );
        state.obstacles.push(obstacle);
        state.push_event(GameEvent::ObstacleSpawned { id });

        let gap = uniform(&mut state.rng, state.tuning.gap_min, state.tuning.gap_max);
        state.spawn_cursor -= gap;
        spawned += 1;
    }
    spawned
}

/// Advance the pickup timer; spawn one pickup when it fires.
/// Returns the new pickup's id.
pub fn update_pickup_timer(state: &mut GameState, dt: f32) -> Option<u32> {
    state.pickup_timer -= dt;
    if state.pickup_timer > 0.0 {
        return None;
    }

    let tuning = &state.tuning;
    let ahead = uniform(&mut state.rng, tuning.pickup_ahead_min, tuning.pickup_ahead_max);
    let x = uniform(&mut state.rng, -tuning.lateral_bound, tuning.lateral_bound);
    let pos = Vec3::new(x, tuning.pickup_height, state.player.pos.z - ahead);
    let points = tuning.pickup_points;
    let ttl = tuning.pickup_ttl;
    state.pickup_timer = uniform(
        &mut state.rng,
        tuning.pickup_interval_min,
        tuning.pickup_interval_max,
    );

    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        pos,
        points,
        collectible: true,
        ttl,
        collect_progress: None,
    });
    log::debug!("Spawned pickup #{} at x={:.2} z={:.2}", id, pos.x, pos.z);
    state.push_event(GameEvent::PickupSpawned { id });
    Some(id)
}

/// Count down pickup lifetimes and drop uncollected pickups that expired.
/// Collected pickups are left to finish their growth effect.
pub fn expire_pickups(state: &mut GameState, dt: f32) -> usize {
    let mut expired = Vec::new();
    state.pickups.retain_mut(|p| {
        p.ttl -= dt;
        if p.collectible && p.ttl <= 0.0 {
            expired.push(p.id);
            false
        } else {
            true
        }
    });
    let count = expired.len();
    for id in expired {
        state.push_event(GameEvent::PickupExpired { id });
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_horizon_fill_scenario() {
        // Player at z=0, horizon 60, gaps (6.2, 9.2), cap 14
        for seed in 0..50 {
            let mut state = GameState::new(seed, Tuning::default());
            let spawned = fill_obstacle_horizon(&mut state);
            assert!((6..=9).contains(&spawned), "seed {seed}: spawned {spawned}");
            assert!(state.obstacles.len() <= 14);
            assert!(state.spawn_cursor <= -60.0);
            // A second pass has nothing to do
            assert_eq!(fill_obstacle_horizon(&mut state), 0);
        }
    }

    #[test]
    fn test_obstacles_laid_out_ahead_in_order() {
        let mut state = GameState::new(3, Tuning::default());
        fill_obstacle_horizon(&mut state);
        assert_eq!(state.obstacles[0].pos.z, -10.0);
        for pair in state.obstacles.windows(2) {
            let gap = pair[0].pos.z - pair[1].pos.z;
            assert!(gap >= 6.2 - 1e-4 && gap <= 9.2 + 1e-4, "gap {gap}");
        }
    }

    #[test]
    fn test_cap_limits_spawning() {
        let tuning = Tuning {
            max_obstacles: 3,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        assert_eq!(fill_obstacle_horizon(&mut state), 3);
        assert_eq!(state.obstacles.len(), 3);
        assert!(state.spawn_cursor > -60.0);
    }

    #[test]
    fn test_cursor_catches_up_with_player() {
        let mut state = GameState::new(1, Tuning::default());
        state.player.pos.z = -200.0;
        fill_obstacle_horizon(&mut state);
        assert!(state.obstacles.iter().all(|o| o.pos.z <= -210.0));
    }

    #[test]
    fn test_pickup_timer_fires_and_rerolls() {
        let tuning = Tuning::default();
        let mut state = GameState::new(9, tuning.clone());
        state.pickup_timer = 0.05;
        assert_eq!(update_pickup_timer(&mut state, 0.01), None);
        let id = update_pickup_timer(&mut state, 0.05).expect("timer should fire");
        let pickup = &state.pickups[0];
        assert_eq!(pickup.id, id);
        assert!(pickup.collectible);
        let ahead = state.player.pos.z - pickup.pos.z;
        assert!(ahead >= tuning.pickup_ahead_min && ahead <= tuning.pickup_ahead_max);
        assert!(state.pickup_timer >= tuning.pickup_interval_min);
        assert!(state.pickup_timer <= tuning.pickup_interval_max);
    }

    #[test]
    fn test_uncollected_pickup_expires_after_ttl() {
        let mut state = GameState::new(2, Tuning::default());
        state.pickup_timer = 0.0;
        update_pickup_timer(&mut state, 0.0);
        state.drain_events();

        // 16.9s: still alive
        for _ in 0..169 {
            expire_pickups(&mut state, 0.1);
        }
        assert_eq!(state.pickups.len(), 1);
        for _ in 0..2 {
            expire_pickups(&mut state, 0.1);
        }
        assert!(state.pickups.is_empty());
        assert_eq!(state.score, 0);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::PickupExpired { .. }]
        ));
    }

    #[test]
    fn test_collected_pickup_not_expired() {
        let mut state = GameState::new(2, Tuning::default());
        state.pickup_timer = 0.0;
        update_pickup_timer(&mut state, 0.0);
        state.pickups[0].collect();
        expire_pickups(&mut state, 100.0);
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_lateral_fallback_when_band_collapses() {
        // A band narrower than the minimum forces the full range
        let tuning = Tuning {
            lane_band_half_width: 0.1,
            lane_min_band_width: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let samples: Vec<f32> = (0..500)
            .map(|_| biased_lateral(&mut rng, 4.0, &tuning))
            .collect();
        assert!(samples.iter().any(|&x| x < -2.0));
    }

    #[test]
    fn test_lateral_pure_follow_stays_near_player() {
        let tuning = Tuning {
            lane_follow_weight: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..200 {
            let x = biased_lateral(&mut rng, 1.0, &tuning);
            assert!((x - 1.0).abs() <= tuning.lane_band_half_width);
        }
    }

    proptest! {
        #[test]
        fn prop_lateral_within_bound(seed in any::<u64>(), player_x in -50.0f32..50.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let x = biased_lateral(&mut rng, player_x, &tuning);
            prop_assert!(x.abs() <= tuning.lateral_bound);
        }

        #[test]
        fn prop_fill_respects_cap_and_horizon(seed in any::<u64>(), cap in 1usize..20, player_z in -500.0f32..0.0) {
            let tuning = Tuning { max_obstacles: cap, ..Tuning::default() };
            let mut state = GameState::new(seed, tuning.clone());
            state.player.pos.z = player_z;
            fill_obstacle_horizon(&mut state);
            prop_assert!(state.obstacles.len() <= cap);
            let overshoot = player_z - state.spawn_cursor;
            prop_assert!(overshoot <= tuning.spawn_horizon + tuning.gap_max + 1e-3);
        }
    }
}
