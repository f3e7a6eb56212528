//! Game balance and per-version presets
//!
//! Every number that shapes the play-feel lives here. The lane-bias and gap
//! constants are trial-tuned; change them only with a play-test.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game version presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Capsule runner, sparser obstacle field
    Classic,
    /// Rigged avatar with the denser obstacle field
    #[default]
    Parkour,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Parkour => "Parkour",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "capsule" => Some(Preset::Classic),
            "parkour" | "rigged" => Some(Preset::Parkour),
            _ => None,
        }
    }

    /// Live obstacle cap for this preset
    pub fn max_obstacles(&self) -> usize {
        match self {
            Preset::Classic => 10,
            Preset::Parkour => 14,
        }
    }
}

/// Errors raised while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid range for `{field}`: min {min} > max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("spawn_start_offset {offset} must be below spawn_horizon {horizon}")]
    StartBeyondHorizon { offset: f32, horizon: f32 },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Obstacle horizon ===
    /// Live obstacle cap
    pub max_obstacles: usize,
    /// Distance ahead of the player that must stay populated
    pub spawn_horizon: f32,
    /// First obstacle distance ahead of the player (also the catch-up floor)
    pub spawn_start_offset: f32,
    /// Gap between consecutive obstacles
    pub gap_min: f32,
    pub gap_max: f32,

    // === Lateral placement ===
    /// Half width of the playable band obstacles are placed in
    pub lateral_bound: f32,
    /// Weight pulling the lane centre toward the player (0 = pure random)
    pub lane_follow_weight: f32,
    /// Half width of the sampling band around the lane centre
    pub lane_band_half_width: f32,
    /// Narrower clamped bands fall back to the full lateral range
    pub lane_min_band_width: f32,

    // === Obstacle shape ===
    pub obstacle_half_size_min: f32,
    pub obstacle_half_size_max: f32,
    /// Hammer rotor angular speed (rad/s, sign drawn separately)
    pub rotor_speed_min: f32,
    pub rotor_speed_max: f32,
    /// Finned pillar spin (rad/s, sign drawn separately)
    pub spin_rate_min: f32,
    pub spin_rate_max: f32,

    // === Pickups ===
    pub pickup_interval_min: f32,
    pub pickup_interval_max: f32,
    pub pickup_ahead_min: f32,
    pub pickup_ahead_max: f32,
    /// Seconds an uncollected pickup survives
    pub pickup_ttl: f32,
    pub pickup_points: u32,
    pub pickup_radius: f32,
    /// Height of the pickup centre above the floor
    pub pickup_height: f32,
    /// Duration of the growth effect after collection
    pub pickup_collect_duration: f32,

    // === World ===
    /// Objects further than this behind the player are destroyed
    pub cleanup_distance: f32,
    /// Falling below this height ends the run
    pub fall_limit: f32,
    /// Half width of the floor strip; outside it the player falls
    pub track_half_width: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_height: f32,
    pub run_speed: f32,
    pub strafe_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Tuning {
    /// Tuning for a version preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            max_obstacles: preset.max_obstacles(),
            spawn_horizon: 60.0,
            spawn_start_offset: 10.0,
            gap_min: 6.2,
            gap_max: 9.2,

            lateral_bound: 4.0,
            lane_follow_weight: 0.6,
            lane_band_half_width: 1.5,
            lane_min_band_width: 0.5,

            obstacle_half_size_min: 0.5,
            obstacle_half_size_max: 1.1,
            rotor_speed_min: 1.5,
            rotor_speed_max: 4.0,
            spin_rate_min: 0.6,
            spin_rate_max: 1.8,

            pickup_interval_min: 1.2,
            pickup_interval_max: 2.6,
            pickup_ahead_min: 16.0,
            pickup_ahead_max: 30.0,
            pickup_ttl: 17.0,
            pickup_points: 10,
            pickup_radius: 0.8,
            pickup_height: 1.0,
            pickup_collect_duration: 0.25,

            cleanup_distance: 25.0,
            fall_limit: -8.0,
            track_half_width: 5.0,

            player_radius: 0.45,
            player_height: 1.8,
            run_speed: 9.0,
            strafe_speed: 6.0,
            jump_velocity: 7.5,
            gravity: 22.0,
        }
    }

    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Self::from_json_with_base(json, Self::default())
    }

    /// Overlay JSON overrides onto `base`; missing fields keep the base values
    pub fn from_json_with_base(json: &str, base: Tuning) -> Result<Self, TuningError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(base)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let tuning: Tuning = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every range and positive quantity
    pub fn validate(&self) -> Result<(), TuningError> {
        let ranges = [
            ("gap", self.gap_min, self.gap_max),
            (
                "obstacle_half_size",
                self.obstacle_half_size_min,
                self.obstacle_half_size_max,
            ),
            ("rotor_speed", self.rotor_speed_min, self.rotor_speed_max),
            ("spin_rate", self.spin_rate_min, self.spin_rate_max),
            (
                "pickup_interval",
                self.pickup_interval_min,
                self.pickup_interval_max,
            ),
            ("pickup_ahead", self.pickup_ahead_min, self.pickup_ahead_max),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvalidRange { field, min, max });
            }
        }

        if self.max_obstacles == 0 {
            return Err(TuningError::NonPositive {
                field: "max_obstacles",
                value: 0.0,
            });
        }

        let positives = [
            ("gap_min", self.gap_min),
            ("spawn_horizon", self.spawn_horizon),
            ("spawn_start_offset", self.spawn_start_offset),
            ("lateral_bound", self.lateral_bound),
            ("obstacle_half_size_min", self.obstacle_half_size_min),
            ("pickup_interval_min", self.pickup_interval_min),
            ("pickup_ttl", self.pickup_ttl),
            ("pickup_collect_duration", self.pickup_collect_duration),
            ("cleanup_distance", self.cleanup_distance),
            ("player_radius", self.player_radius),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("pickup_radius", self.pickup_radius),
            ("track_half_width", self.track_half_width),
            ("run_speed", self.run_speed),
            ("strafe_speed", self.strafe_speed),
            ("jump_velocity", self.jump_velocity),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.lane_follow_weight) {
            return Err(TuningError::OutOfRange {
                field: "lane_follow_weight",
                value: self.lane_follow_weight,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.spawn_start_offset >= self.spawn_horizon {
            return Err(TuningError::StartBeyondHorizon {
                offset: self.spawn_start_offset,
                horizon: self.spawn_horizon,
            });
        }
        Ok(())
    }

    /// Capsule centre height when standing on the floor
    #[inline]
    pub fn standing_height(&self) -> f32 {
        self.player_height / 2.0
    }
}
