//! Heads-up display state and pickup feedback
//!
//! Effects are plain progress fractions in [0, 1] advanced by frame time;
//! what gets drawn is a pure function of that progress. Nothing here feeds
//! back into the simulation.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::CameraRig;
use crate::sim::{GameEvent, GameState, terminal_message};

/// Score pulse length (seconds)
pub const PULSE_DURATION: f32 = 0.2;
/// Extra scale at the peak of the pulse
pub const PULSE_AMOUNT: f32 = 0.35;
/// Floating label lifetime (seconds)
pub const LABEL_DURATION: f32 = 0.9;
/// Pixels a label rises over its lifetime
pub const LABEL_RISE: f32 = 48.0;
/// World label anchor above the capsule centre
pub const LABEL_HEAD_OFFSET: f32 = 1.4;
/// Screen position of the score readout (top-left origin)
pub const SCORE_ANCHOR: Vec2 = Vec2::new(24.0, 56.0);
/// Screen label offset from the score readout
const SCREEN_LABEL_OFFSET: Vec2 = Vec2::new(120.0, 0.0);

/// Score readout scale at pulse progress `p`
pub fn pulse_scale(p: f32) -> f32 {
    1.0 + PULSE_AMOUNT * (PI * p.clamp(0.0, 1.0)).sin()
}

/// Label rise (pixels, upward) and alpha at progress `p`
pub fn label_motion(p: f32) -> (f32, f32) {
    let p = p.clamp(0.0, 1.0);
    let ease_out = 1.0 - (1.0 - p).powi(2);
    (LABEL_RISE * ease_out, 1.0 - p * p)
}

/// Where a floating label is pinned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelAnchor {
    /// Fixed pixel position
    Screen(Vec2),
    /// World point, projected through the camera every frame
    World(Vec3),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingLabel {
    pub text: String,
    pub anchor: LabelAnchor,
    pub progress: f32,
}

/// A label ready to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub text: String,
    pub pos: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Hud {
    /// Score pulse progress, None when idle
    pub score_pulse: Option<f32>,
    pub labels: Vec<FloatingLabel>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to simulation events
    pub fn handle_event(&mut self, event: &GameEvent, state: &GameState) {
        match event {
            GameEvent::PickupCollected { points, .. } => {
                let text = format!("+{}", points);
                self.score_pulse = Some(0.0);
                self.labels.push(FloatingLabel {
                    text: text.clone(),
                    anchor: LabelAnchor::Screen(SCORE_ANCHOR + SCREEN_LABEL_OFFSET),
                    progress: 0.0,
                });
                self.labels.push(FloatingLabel {
                    text,
                    anchor: LabelAnchor::World(
                        state.player.pos + Vec3::Y * LABEL_HEAD_OFFSET,
                    ),
                    progress: 0.0,
                });
            }
            GameEvent::Restarted { .. } => self.clear(),
            _ => {}
        }
    }

    /// Advance every effect; finished ones are dropped
    pub fn advance(&mut self, dt: f32) {
        if let Some(p) = self.score_pulse.as_mut() {
            *p += dt / PULSE_DURATION;
            if *p >= 1.0 {
                self.score_pulse = None;
            }
        }
        for label in &mut self.labels {
            label.progress += dt / LABEL_DURATION;
        }
        self.labels.retain(|l| l.progress < 1.0);
    }

    /// Drop every effect (restart)
    pub fn clear(&mut self) {
        self.score_pulse = None;
        self.labels.clear();
    }

    pub fn score_scale(&self) -> f32 {
        self.score_pulse.map_or(1.0, pulse_scale)
    }

    /// Labels positioned for this frame; world labels behind the camera are skipped
    pub fn label_views(&self, camera: &CameraRig, viewport: Vec2) -> Vec<LabelView> {
        self.labels
            .iter()
            .filter_map(|label| {
                let base = match label.anchor {
                    LabelAnchor::Screen(pos) => pos,
                    LabelAnchor::World(point) => camera.world_to_screen(point, viewport)?,
                };
                let (rise, alpha) = label_motion(label.progress);
                Some(LabelView {
                    text: label.text.clone(),
                    pos: base - Vec2::Y * rise,
                    alpha,
                })
            })
            .collect()
    }

    /// HUD text lines: time, score and the terminal message once over
    pub fn lines(&self, state: &GameState) -> Vec<String> {
        let mut lines = vec![
            format!("Time: {:.1}", state.elapsed),
            format!("Score: {}", state.score),
        ];
        if let Some(message) = terminal_message(state) {
            lines.extend(message.lines().map(str::to_owned));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn collected() -> GameEvent {
        GameEvent::PickupCollected {
            id: 3,
            points: 10,
            pos: Vec3::ZERO,
        }
    }

    #[test]
    fn test_pulse_shape() {
        assert_eq!(pulse_scale(0.0), 1.0);
        assert!((pulse_scale(0.5) - (1.0 + PULSE_AMOUNT)).abs() < 1e-5);
        assert!((pulse_scale(1.0) - 1.0).abs() < 1e-5);
        assert!((pulse_scale(3.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_label_motion_rises_and_fades() {
        assert_eq!(label_motion(0.0), (0.0, 1.0));
        let (rise_mid, alpha_mid) = label_motion(0.5);
        assert!(rise_mid > LABEL_RISE / 2.0, "ease-out front-loads the rise");
        assert!((alpha_mid - 0.75).abs() < 1e-5);
        let (rise_end, alpha_end) = label_motion(1.0);
        assert_eq!(rise_end, LABEL_RISE);
        assert_eq!(alpha_end, 0.0);
    }

    #[test]
    fn test_collection_spawns_both_labels() {
        let state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new();
        hud.handle_event(&collected(), &state);
        assert_eq!(hud.score_pulse, Some(0.0));
        assert_eq!(hud.labels.len(), 2);
        assert!(hud.labels.iter().all(|l| l.text == "+10"));
        assert!(matches!(hud.labels[1].anchor, LabelAnchor::World(p) if p.y > state.player.pos.y));
    }

    #[test]
    fn test_effects_expire() {
        let state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new();
        hud.handle_event(&collected(), &state);

        hud.advance(0.1);
        assert!(hud.score_scale() > 1.0);
        hud.advance(0.15);
        assert_eq!(hud.score_pulse, None);
        assert_eq!(hud.labels.len(), 2);
        hud.advance(0.7);
        assert!(hud.labels.is_empty());
    }

    #[test]
    fn test_world_label_projects_above_player() {
        let state = GameState::new(1, Tuning::default());
        let camera = CameraRig::new(state.player.pos);
        let mut hud = Hud::new();
        hud.handle_event(&collected(), &state);

        let views = hud.label_views(&camera, VIEWPORT);
        assert_eq!(views.len(), 2);
        let world = &views[1];
        assert!(world.pos.y < VIEWPORT.y / 2.0);
        assert!((world.pos.x - VIEWPORT.x / 2.0).abs() < 1.0);
    }

    #[test]
    fn test_world_label_hidden_behind_camera() {
        let state = GameState::new(1, Tuning::default());
        // Camera far ahead looking back at its own target: the label is behind it
        let camera = CameraRig::new(Vec3::new(0.0, 0.9, -100.0));
        let mut hud = Hud::new();
        hud.labels.push(FloatingLabel {
            text: "+10".into(),
            anchor: LabelAnchor::World(camera.eye + camera.arm_direction() * 3.0),
            progress: 0.2,
        });
        hud.handle_event(&GameEvent::PickupExpired { id: 1 }, &state);
        assert!(hud.label_views(&camera, VIEWPORT).is_empty());
    }

    #[test]
    fn test_restart_clears_effects() {
        let state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new();
        hud.handle_event(&collected(), &state);
        hud.handle_event(&GameEvent::Restarted { run_index: 1 }, &state);
        assert_eq!(hud.score_pulse, None);
        assert!(hud.labels.is_empty());
    }

    #[test]
    fn test_lines_include_terminal_message() {
        let mut state = GameState::new(1, Tuning::default());
        state.elapsed = 3.26;
        state.score = 20;
        let hud = Hud::new();
        assert_eq!(hud.lines(&state), vec!["Time: 3.3", "Score: 20"]);

        state.phase = GamePhase::GameOver;
        let lines = hud.lines(&state);
        assert!(lines.len() > 2);
        assert!(lines.iter().any(|l| l.starts_with("GAME OVER")));
    }
}
