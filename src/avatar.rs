//! Procedural walk cycle for the low-poly runner
//!
//! Limb angles are sinusoids of a stride phase. A blend weight eases between
//! the run cycle (on the floor) and a tucked airborne pose, clamped to [0, 1].

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::lerp;

/// Peak leg swing (radians)
const LEG_SWING: f32 = 0.7;
/// Arms swing opposite the legs, a bit less
const ARM_SWING: f32 = 0.55;
/// Vertical bob at full stride
const BOB_HEIGHT: f32 = 0.06;
/// Knee bend while airborne
const TUCK_KNEE: f32 = 0.9;
/// Arms raised while airborne
const TUCK_ARM: f32 = -0.6;
/// Stride cycles per second at a run speed of 1 unit/s
const STRIDES_PER_UNIT: f32 = 0.16;
/// Blend change per second
const BLEND_RATE: f32 = 6.0;

/// Joint rotations (radians, about the lateral axis) plus hip offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AvatarPose {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_knee: f32,
    pub right_knee: f32,
    pub left_arm: f32,
    pub right_arm: f32,
    /// Hip height offset
    pub bob: f32,
}

/// Pose at stride `phase` with run weight `blend` (1 = full run, 0 = airborne)
pub fn walk_pose(phase: f32, blend: f32) -> AvatarPose {
    let blend = blend.clamp(0.0, 1.0);
    let swing = phase.sin();
    // Knees bend on the forward swing only
    let knee_l = (phase + PI / 2.0).sin().max(0.0) * 0.8;
    let knee_r = (phase - PI / 2.0).sin().max(0.0) * 0.8;

    AvatarPose {
        left_leg: lerp(0.3, swing * LEG_SWING, blend),
        right_leg: lerp(-0.2, -swing * LEG_SWING, blend),
        left_knee: lerp(TUCK_KNEE, knee_l, blend),
        right_knee: lerp(TUCK_KNEE, knee_r, blend),
        left_arm: lerp(TUCK_ARM, -swing * ARM_SWING, blend),
        right_arm: lerp(TUCK_ARM, swing * ARM_SWING, blend),
        bob: swing.abs() * BOB_HEIGHT * blend,
    }
}

/// Per-runner animation state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Avatar {
    /// Stride phase, wrapped to [0, τ)
    pub phase: f32,
    /// Run-cycle weight
    pub blend: f32,
}

impl Avatar {
    /// Advance by one render frame
    pub fn update(&mut self, dt: f32, speed: f32, on_floor: bool) {
        let target = if on_floor && speed > 0.1 { 1.0 } else { 0.0 };
        let step = BLEND_RATE * dt;
        self.blend = if self.blend < target {
            (self.blend + step).min(target)
        } else {
            (self.blend - step).max(target)
        }
        .clamp(0.0, 1.0);

        if on_floor {
            self.phase = (self.phase + speed * STRIDES_PER_UNIT * TAU * dt).rem_euclid(TAU);
        }
    }

    pub fn pose(&self) -> AvatarPose {
        walk_pose(self.phase, self.blend)
    }
}
