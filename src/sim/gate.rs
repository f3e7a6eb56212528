//! Game-over gate
//!
//! `Running -> GameOver` on an obstacle contact or a fall below the world.
//! The transition happens once; later triggers are ignored until a restart.

use glam::Vec3;

use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// End the run. Returns false (and changes nothing) if it already ended.
pub fn enter_game_over(state: &mut GameState, cause: GameOverCause) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }

    state.phase = GamePhase::GameOver;
    state.player.vel = Vec3::ZERO;
    state.game_over_cause = Some(cause);
    log::info!(
        "Game over ({:?}) after {:.1}s with score {}",
        cause,
        state.elapsed,
        state.score
    );
    state.push_event(GameEvent::GameOver {
        cause,
        elapsed: state.elapsed,
        score: state.score,
    });
    true
}

/// Check the movement contact, then the fall limit
pub fn check_fatal(state: &mut GameState, hit_obstacle: Option<u32>) -> bool {
    if let Some(id) = hit_obstacle {
        return enter_game_over(state, GameOverCause::HitObstacle { id });
    }
    if state.player.pos.y < state.tuning.fall_limit {
        return enter_game_over(state, GameOverCause::Fell);
    }
    false
}

/// Terminal message shown while the run is over
pub fn terminal_message(state: &GameState) -> Option<String> {
    if state.phase != GamePhase::GameOver {
        return None;
    }
    let reason = match state.game_over_cause {
        Some(GameOverCause::Fell) => "You fell!",
        _ => "You crashed!",
    };
    Some(format!(
        "GAME OVER - {}\nTime: {:.1}s\nScore: {}\nPress R to restart",
        reason, state.elapsed, state.score
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_transition_zeroes_velocity_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.player.vel = Vec3::new(1.0, 2.0, -9.0);
        state.elapsed = 12.34;
        state.score = 30;

        assert!(enter_game_over(&mut state, GameOverCause::HitObstacle { id: 7 }));
        assert_eq!(state.player.vel, Vec3::ZERO);
        let message = terminal_message(&state).unwrap();
        assert!(message.contains("Time: 12.3s"));
        assert!(message.contains("Score: 30"));

        // Second trigger changes nothing
        state.player.vel = Vec3::new(0.0, -3.0, 0.0);
        state.score = 99;
        assert!(!enter_game_over(&mut state, GameOverCause::Fell));
        assert_eq!(state.game_over_cause, Some(GameOverCause::HitObstacle { id: 7 }));
        assert_eq!(state.player.vel, Vec3::new(0.0, -3.0, 0.0));

        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_fall_limit() {
        let mut state = GameState::new(1, Tuning::default());
        state.player.pos.y = -7.9;
        assert!(!check_fatal(&mut state, None));
        state.player.pos.y = -8.1;
        assert!(check_fatal(&mut state, None));
        assert_eq!(state.game_over_cause, Some(GameOverCause::Fell));
        assert!(terminal_message(&state).unwrap().contains("fell"));
    }

    #[test]
    fn test_contact_wins_over_fall() {
        let mut state = GameState::new(1, Tuning::default());
        state.player.pos.y = -20.0;
        assert!(check_fatal(&mut state, Some(4)));
        assert_eq!(state.game_over_cause, Some(GameOverCause::HitObstacle { id: 4 }));
        assert!(terminal_message(&state).unwrap().contains("crashed"));
    }

    #[test]
    fn test_no_message_while_running() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(terminal_message(&state), None);
    }
}
