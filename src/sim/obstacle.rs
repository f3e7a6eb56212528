//! Obstacle archetypes and the obstacle factory
//!
//! Each obstacle is one of a few fixed archetypes. Animated parameters live
//! on the archetype variant itself, so a barricade carries nothing extra and
//! a hammer pillar carries exactly its rotor.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;
use crate::uniform;

/// A secondary rotating part with its own axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotor {
    /// Unit rotation axis
    pub axis: Vec3,
    /// Angular speed in radians/sec (signed)
    pub speed: f32,
    /// Accumulated angle, wrapped to [0, τ)
    pub angle: f32,
}

/// Obstacle visual archetypes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleArchetype {
    /// Wide low wall across part of the lane
    Barricade,
    /// Tall pillar with a swinging hammer
    HammerPillar { rotor: Rotor },
    /// Pillar with fins that spins about its vertical axis
    FinnedPillar { spin_rate: f32, angle: f32 },
}

impl ObstacleArchetype {
    /// Collision half extents as multiples of the obstacle half-size
    pub fn extent_factors(&self) -> Vec3 {
        match self {
            ObstacleArchetype::Barricade => Vec3::new(1.6, 1.0, 0.5),
            // Pillar plus the full sweep of the hammer head
            ObstacleArchetype::HammerPillar { .. } => Vec3::new(1.5, 2.0, 1.5),
            ObstacleArchetype::FinnedPillar { .. } => Vec3::new(0.9, 1.8, 0.9),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleArchetype::Barricade => "barricade",
            ObstacleArchetype::HammerPillar { .. } => "hammer_pillar",
            ObstacleArchetype::FinnedPillar { .. } => "finned_pillar",
        }
    }
}

/// A solid obstacle resting on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Centre of the collision box
    pub pos: Vec3,
    pub half_size: f32,
    pub archetype: ObstacleArchetype,
}

impl Obstacle {
    /// Collision box bounding the whole visual
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.archetype.extent_factors() * self.half_size)
    }

    /// Advance animated parts by one render frame
    pub fn animate(&mut self, dt: f32) {
        match &mut self.archetype {
            ObstacleArchetype::Barricade => {}
            ObstacleArchetype::HammerPillar { rotor } => {
                rotor.angle = wrap_angle(rotor.angle + rotor.speed * dt);
            }
            ObstacleArchetype::FinnedPillar { spin_rate, angle } => {
                *angle = wrap_angle(*angle + *spin_rate * dt);
            }
        }
    }
}

#[inline]
fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Random unit vector (rejection-sampled inside the unit ball)
fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Build one obstacle at lateral `x`, longitudinal `z`
pub fn build_obstacle<R: Rng + ?Sized>(
    id: u32,
    x: f32,
    z: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> Obstacle {
    let half_size = uniform(
        rng,
        tuning.obstacle_half_size_min,
        tuning.obstacle_half_size_max,
    );

    let archetype = match rng.random_range(0..3u8) {
        0 => ObstacleArchetype::Barricade,
        1 => {
            let axis = random_axis(rng);
            let speed = uniform(rng, tuning.rotor_speed_min, tuning.rotor_speed_max)
                * random_sign(rng);
            ObstacleArchetype::HammerPillar {
                rotor: Rotor {
                    axis,
                    speed,
                    angle: 0.0,
                },
            }
        }
        _ => {
            let spin_rate =
                uniform(rng, tuning.spin_rate_min, tuning.spin_rate_max) * random_sign(rng);
            ObstacleArchetype::FinnedPillar {
                spin_rate,
                angle: 0.0,
            }
        }
    };

    // Rest the collision box on the floor
    let height = archetype.extent_factors().y * half_size;
    Obstacle {
        id,
        pos: Vec3::new(x, height, z),
        half_size,
        archetype,
    }
}
