//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gate;
pub mod obstacle;
pub mod player;
pub mod spawn;
pub mod state;
pub mod sweep;
pub mod tick;

pub use collision::{Aabb, Capsule, capsule_aabb_overlap, capsule_sphere_overlap};
pub use gate::{enter_game_over, terminal_message};
pub use obstacle::{Obstacle, ObstacleArchetype, Rotor, build_obstacle};
pub use player::{MoveResult, step_player};
pub use spawn::{biased_lateral, fill_obstacle_horizon, update_pickup_timer};
pub use state::{GameEvent, GameOverCause, GamePhase, GameState, Pickup, Player};
pub use sweep::sweep_behind;
pub use tick::{TickInput, advance_frame, tick};
