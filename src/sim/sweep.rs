//! Cleanup of objects left behind the runner

use super::state::GameState;

/// Destroy every obstacle and pickup more than `cleanup_distance` behind
/// the player. Returns the number of objects removed.
pub fn sweep_behind(state: &mut GameState) -> usize {
    let limit = state.player.pos.z + state.tuning.cleanup_distance;
    let before = state.obstacles.len() + state.pickups.len();

    state.obstacles.retain(|o| o.pos.z <= limit);
    state.pickups.retain(|p| p.pos.z <= limit);

    let removed = before - state.obstacles.len() - state.pickups.len();
    if removed > 0 {
        log::debug!("Swept {} objects behind z={:.1}", removed, limit);
    }
    removed
}
