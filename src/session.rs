//! Fixed-timestep session driver
//!
//! Plays the host's role: turns variable frame times into fixed physics
//! steps, runs the render-frame update, and routes simulation events to the
//! HUD and the leaderboard.

use glam::Vec2;

use crate::avatar::{Avatar, AvatarPose};
use crate::camera::CameraRig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::hud::{Hud, LabelView};
use crate::input::{Action, ActionMap, InputState};
use crate::sim::{GameEvent, GameState, TickInput, advance_frame, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Session {
    pub state: GameState,
    pub hud: Hud,
    pub camera: CameraRig,
    pub avatar: Avatar,
    pub high_scores: HighScores,
    pub actions: ActionMap,
    /// Scripted steering instead of player input
    pub autopilot: bool,
    /// Viewport in pixels, for label projection
    pub viewport: Vec2,
    /// Commands for the next physics step; one-shots wait here until a step runs
    input: TickInput,
    accumulator: f32,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let state = GameState::new(seed, tuning);
        let camera = CameraRig::new(state.player.pos);
        Self {
            state,
            hud: Hud::new(),
            camera,
            avatar: Avatar::default(),
            high_scores: HighScores::new(),
            actions: ActionMap::with_defaults(),
            autopilot: false,
            viewport: Vec2::new(1280.0, 720.0),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Run one host frame: physics substeps, then the render update.
    /// Returns the number of physics steps taken.
    pub fn update(&mut self, frame_dt: f32, input: &InputState) -> u32 {
        if self.actions.is_pressed(Action::ToggleMouseLook, input) {
            self.camera.toggle_mouse_look();
        }
        self.camera.look(input.mouse_delta);

        let frame_input = self.actions.tick_input(input);
        self.input.lateral = frame_input.lateral;
        self.input.jump |= frame_input.jump;
        self.input.restart |= frame_input.restart;
        self.input.autopilot = self.autopilot;

        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.restart = false;

            self.dispatch_events();
        }
        // Drop time we could not simulate instead of spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.render_frame(frame_dt);
        substeps
    }

    /// Render-rate update: time, animation, camera and HUD effects
    pub fn render_frame(&mut self, dt: f32) {
        advance_frame(&mut self.state, dt);
        let player = &self.state.player;
        let speed = player.vel.length();
        self.avatar.update(dt, speed, player.on_floor);
        self.camera.follow(player.pos, dt);
        self.hud.advance(dt);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            self.hud.handle_event(&event, &self.state);
            match event {
                GameEvent::GameOver { elapsed, score, .. } => {
                    self.high_scores
                        .add_run(score, elapsed, self.state.run_index);
                }
                GameEvent::Restarted { .. } => {
                    self.camera.snap(self.state.player.pos);
                    self.avatar = Avatar::default();
                }
                _ => {}
            }
        }
    }

    pub fn hud_lines(&self) -> Vec<String> {
        self.hud.lines(&self.state)
    }

    pub fn label_views(&self) -> Vec<LabelView> {
        self.hud.label_views(&self.camera, self.viewport)
    }

    pub fn avatar_pose(&self) -> AvatarPose {
        self.avatar.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::sim::GamePhase;

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut session = Session::new(1, Tuning::default());
        let input = InputState::new();
        assert_eq!(session.update(SIM_DT * 3.5, &input), 3);
        assert_eq!(session.state.time_ticks, 3);
        // Leftover half step carries into the next frame
        assert_eq!(session.update(SIM_DT * 0.6, &input), 1);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut session = Session::new(1, Tuning::default());
        let steps = session.update(5.0, &InputState::new());
        assert!(steps <= MAX_SUBSTEPS);
        assert!((session.state.elapsed - MAX_FRAME_DT).abs() < 1e-5);
    }

    #[test]
    fn test_game_over_records_run_and_restart_resets() {
        let mut session = Session::new(3, Tuning::default());
        session.state.player.pos.y = -50.0;
        session.state.score = 30;
        let mut input = InputState::new();
        session.update(SIM_DT, &input);
        assert_eq!(session.state.phase, GamePhase::GameOver);
        assert_eq!(session.high_scores.best().map(|e| e.score), Some(30));
        assert!(session.hud_lines().iter().any(|l| l.contains("GAME OVER")));

        input.press(Key::R);
        session.update(SIM_DT, &input);
        assert_eq!(session.state.phase, GamePhase::Running);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.run_index, 1);
    }

    #[test]
    fn test_short_frames_keep_one_shot_presses() {
        let frame = 1.0 / 144.0;
        let mut session = Session::new(3, Tuning::default());
        session.state.player.pos.y = -50.0;
        let mut input = InputState::new();
        session.update(SIM_DT, &input);
        assert_eq!(session.state.phase, GamePhase::GameOver);

        // Drain the leftover so the press lands on a frame with no step
        session.accumulator = 0.0;
        input.press(Key::R);
        assert_eq!(session.update(frame, &input), 0);
        input.release(Key::R);
        input.clear_frame_state();
        for _ in 0..10 {
            session.update(frame, &input);
            input.clear_frame_state();
        }
        assert_eq!(session.state.phase, GamePhase::Running);
        assert_eq!(session.state.run_index, 1);

        session.accumulator = 0.0;
        input.press(Key::Space);
        assert_eq!(session.update(frame, &input), 0);
        input.release(Key::Space);
        input.clear_frame_state();
        session.update(frame, &input);
        session.update(frame, &input);
        assert!(!session.state.player.on_floor);
        assert!(session.state.player.vel.y > 0.0);
    }

    #[test]
    fn test_mouse_look_toggle() {
        let mut session = Session::new(3, Tuning::default());
        let mut input = InputState::new();
        input.press(Key::M);
        input.mouse_delta = Vec2::new(-50.0, 0.0);
        session.update(SIM_DT, &input);
        assert!(session.camera.mouse_look);
        assert!(session.camera.yaw > 0.0);
    }

    #[test]
    fn test_autopilot_session_survives_a_while() {
        let mut session = Session::new(8, Tuning::default());
        session.autopilot = true;
        let input = InputState::new();
        for _ in 0..120 {
            session.update(1.0 / 60.0, &input);
        }
        assert!(session.state.elapsed > 0.5);
        assert!(session.state.obstacles.len() <= session.state.tuning.max_obstacles);
        assert!(session.avatar_pose().bob >= 0.0);
    }
}
