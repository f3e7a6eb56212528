//! Runner movement
//!
//! Auto-run toward -Z, strafe on X, jump and gravity on Y. The floor is a
//! strip of `track_half_width` either side of the centre line; stepping off
//! it means falling. Obstacle contacts are reported, not resolved: touching
//! one ends the run.

use super::collision::{Capsule, capsule_aabb_overlap};
use super::obstacle::Obstacle;
use super::state::Player;
use crate::tuning::Tuning;

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveResult {
    pub on_floor: bool,
    /// First obstacle (by id) touched after moving
    pub hit_obstacle: Option<u32>,
}

/// Player's collision capsule
pub fn player_capsule(player: &Player, tuning: &Tuning) -> Capsule {
    Capsule::upright(player.pos, tuning.player_radius, tuning.player_height)
}

/// Apply gravity, jump and steering, integrate, then query collisions.
/// `lateral` is the steering axis in [-1, 1] (negative = left).
pub fn step_player(
    player: &mut Player,
    lateral: f32,
    jump: bool,
    obstacles: &[Obstacle],
    tuning: &Tuning,
    dt: f32,
) -> MoveResult {
    let standing = tuning.standing_height();
    let prev_y = player.pos.y;

    if player.on_floor {
        if jump {
            player.vel.y = tuning.jump_velocity;
            player.on_floor = false;
        }
    } else {
        player.vel.y -= tuning.gravity * dt;
    }

    player.vel.x = lateral.clamp(-1.0, 1.0) * tuning.strafe_speed;
    player.vel.z = -tuning.run_speed;
    player.pos += player.vel * dt;

    // Land only if we were above the floor surface last step
    let over_floor = player.pos.x.abs() <= tuning.track_half_width;
    if over_floor && player.vel.y <= 0.0 && player.pos.y <= standing && prev_y >= standing - 1e-3 {
        player.pos.y = standing;
        player.vel.y = 0.0;
        player.on_floor = true;
    } else if !over_floor || player.pos.y > standing {
        player.on_floor = false;
    }

    let capsule = player_capsule(player, tuning);
    let hit_obstacle = obstacles
        .iter()
        .find(|o| capsule_aabb_overlap(&capsule, &o.aabb()))
        .map(|o| o.id);

    MoveResult {
        on_floor: player.on_floor,
        hit_obstacle,
    }
}
