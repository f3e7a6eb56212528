//! Third-person camera rig
//!
//! A spring arm behind and above the runner, smoothed toward its rest pose
//! every frame. Optional mouse look swings the arm around the runner.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

/// Largest yaw swing from straight behind (radians)
const MAX_YAW: f32 = 1.2;
/// Pitch limits (radians above the horizon)
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    /// Arm yaw around +Y; 0 looks down -Z from behind the runner
    pub yaw: f32,
    /// Arm pitch above the horizon
    pub pitch: f32,
    /// Spring arm length
    pub arm_length: f32,
    /// Look-at point height above the capsule centre
    pub target_height: f32,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Exponential follow rate (1/s)
    pub follow_sharpness: f32,
    /// Radians per pixel of mouse movement
    pub look_sensitivity: f32,
    pub mouse_look: bool,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.35,
            arm_length: 6.0,
            target_height: 1.2,
            fov_y: 70f32.to_radians(),
            follow_sharpness: 10.0,
            look_sensitivity: 0.004,
            mouse_look: false,
            eye: Vec3::new(0.0, 3.0, 6.0),
            target: Vec3::new(0.0, 1.2, 0.0),
        }
    }
}

impl CameraRig {
    /// Rig already at rest behind `player_pos`
    pub fn new(player_pos: Vec3) -> Self {
        let mut rig = Self::default();
        rig.snap(player_pos);
        rig
    }

    /// Unit vector from the look-at point to the eye
    pub fn arm_direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }

    fn rest_pose(&self, player_pos: Vec3) -> (Vec3, Vec3) {
        let target = player_pos + Vec3::Y * self.target_height;
        (target + self.arm_direction() * self.arm_length, target)
    }

    /// Jump straight to the rest pose (new run, teleport)
    pub fn snap(&mut self, player_pos: Vec3) {
        let (eye, target) = self.rest_pose(player_pos);
        self.eye = eye;
        self.target = target;
    }

    /// Ease toward the rest pose behind `player_pos`
    pub fn follow(&mut self, player_pos: Vec3, dt: f32) {
        let (eye, target) = self.rest_pose(player_pos);
        let t = 1.0 - (-self.follow_sharpness * dt).exp();
        self.eye = self.eye.lerp(eye, t);
        self.target = self.target.lerp(target, t);
    }

    pub fn toggle_mouse_look(&mut self) {
        self.mouse_look = !self.mouse_look;
        if !self.mouse_look {
            self.yaw = 0.0;
        }
        log::debug!("Mouse look {}", if self.mouse_look { "on" } else { "off" });
    }

    /// Apply a mouse delta (pixels); ignored unless mouse look is on
    pub fn look(&mut self, delta: Vec2) {
        if !self.mouse_look {
            return;
        }
        self.yaw = (self.yaw - delta.x * self.look_sensitivity).clamp(-MAX_YAW, MAX_YAW);
        self.pitch = (self.pitch + delta.y * self.look_sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(0.01), 0.1, 250.0);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }

    /// Project a world point to pixel coordinates (origin top-left).
    /// None if the point is behind the camera.
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_proj(viewport.x / viewport.y) * point.extend(1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}
