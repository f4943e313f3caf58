//! Data-driven game balance
//!
//! Every constant the simulation consumes lives in [`Tuning`], supplied once
//! at session construction. Defaults reproduce the reference prototype on a
//! 640x480 viewport. A malformed value is rejected with [`TuningError`] when
//! the session is created, never during ticking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at session construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("road half-widths must satisfy 0 <= half_top <= half_bottom (got {top} / {bottom})")]
    RoadWidths { top: f32, bottom: f32 },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in [0, 1] (got {value})")]
    UnitRange { field: &'static str, value: f32 },
    #[error("light interval range is empty ({min} > {max})")]
    LightIntervals { min: f32, max: f32 },
    #[error("obstacle cooldown range is empty ({min} > {max})")]
    CooldownRange { min: f32, max: f32 },
    #[error("speed tiers must be a non-empty ascending ladder within (0, max_multiplier]")]
    SpeedTiers,
}

/// Game balance constants.
///
/// World distances are in reference pixels (the projection maps them back to
/// the screen); speeds are world units per second; durations are
/// milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Forward motion ===
    /// Base forward speed at multiplier 1.0
    pub base_speed: f32,
    /// Upper bound on the per-tick speed-multiplier input
    pub max_multiplier: f32,
    /// Discrete input levels -> multiplier ladder (keyboard tiers or a
    /// biosignal ratio scaled onto the same range)
    pub speed_tiers: Vec<f32>,
    /// Starting line; players can never be pushed back past it
    pub start_progress: f32,
    /// Initial lateral offset of each player, as a fraction of sprite size
    pub start_lateral_frac: f32,

    // === Lateral motion ===
    /// Lateral acceleration at multiplier 1.0
    pub lateral_accel: f32,
    /// Lateral speed cap at multiplier 1.0
    pub lateral_max: f32,
    /// Per-second exponential drag
    pub lateral_drag: f32,
    /// Steering authority floor when standing still
    pub steer_floor: f32,
    /// Velocity kept when bouncing off a road edge
    pub wall_bounce: f32,

    // === Traffic light ===
    /// Fixed Yellow dwell
    pub yellow_ms: f32,
    /// Green/Red dwell range, drawn uniformly at state entry
    pub light_min_ms: f32,
    pub light_max_ms: f32,

    // === Obstacle ===
    /// Per-tick spawn probability once the cooldown has elapsed
    pub spawn_chance: f32,
    /// Probability the spawned obstacle is oncoming (else trailing)
    pub oncoming_bias: f32,
    /// Oncoming obstacle speed (toward the camera)
    pub oncoming_speed: f32,
    /// Trailing obstacle speed (toward the horizon)
    pub trailing_speed: f32,
    /// Cooldown range drawn at despawn
    pub min_cooldown_ms: f32,
    pub max_cooldown_ms: f32,
    /// Spawn depths for the two lanes
    pub oncoming_spawn_depth: f32,
    pub trailing_spawn_depth: f32,
    /// Lane-center offset as a fraction of the road half-width
    pub lane_offset_frac: f32,
    /// Despawn margins past the horizon / past the bottom edge (px)
    pub despawn_far_margin: f32,
    pub despawn_near_margin: f32,
    /// Obstacle hitbox: half-width fraction of the half-lane, with a pixel
    /// floor, and height fraction of the scaled sprite size
    pub obstacle_hitbox_w: f32,
    pub obstacle_hitbox_min_px: f32,
    pub obstacle_hitbox_h: f32,

    // === Road projection ===
    /// Road half-width at the horizon / at the near edge (px)
    pub half_top: f32,
    pub half_bottom: f32,
    /// Sprite scale at the horizon / near edge, and shrink exponent
    pub scale_far: f32,
    pub scale_near: f32,
    pub scale_gamma: f32,
    /// Horizontal road tilt (px shift of the vanishing point)
    pub tilt: f32,
    /// Screen-space road center at the near edge (px)
    pub center_x: f32,
    /// Distance from horizon to near edge (px)
    pub depth_span: f32,
    /// Depth fraction floor guarding the perspective divide
    pub depth_floor: f32,

    // === Camera ===
    /// Keeps the leading player at a fixed screen height
    pub anchor_offset: f32,
    /// Parallax coefficients per layer (closer layers scroll faster)
    pub road_scroll: f32,
    pub scenery_scroll: f32,
    pub cloud_scroll: f32,
    /// How far past the bottom edge a trailing player may fall (px)
    pub offscreen_margin: f32,

    // === Player sprite ===
    /// Unscaled sprite size (px)
    pub player_size: f32,
    /// Hitbox half-width / height as fractions of the scaled sprite size
    pub player_hitbox_w: f32,
    pub player_hitbox_h: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Forward motion
            base_speed: 60.0,
            max_multiplier: 1.6,
            speed_tiers: vec![0.3, 0.6, 0.85, 1.1, 1.35, 1.6],
            start_progress: 0.0,
            start_lateral_frac: 0.8,

            // Lateral motion
            lateral_accel: 504.0,
            lateral_max: 432.0,
            lateral_drag: 6.0,
            steer_floor: 0.1,
            wall_bounce: 0.25,

            // Traffic light
            yellow_ms: 800.0,
            light_min_ms: 1500.0,
            light_max_ms: 3000.0,

            // Obstacle
            spawn_chance: 0.01,
            oncoming_bias: 0.6,
            oncoming_speed: 33.0,
            trailing_speed: 27.0,
            min_cooldown_ms: 3500.0,
            max_cooldown_ms: 7000.0,
            oncoming_spawn_depth: 0.08,
            trailing_spawn_depth: 0.95,
            lane_offset_frac: 0.33,
            despawn_far_margin: 40.0,
            despawn_near_margin: 80.0,
            obstacle_hitbox_w: 0.35,
            obstacle_hitbox_min_px: 6.0,
            obstacle_hitbox_h: 0.9,

            // Road projection
            half_top: 64.0,
            half_bottom: 256.0,
            scale_far: 0.35,
            scale_near: 1.35,
            scale_gamma: 1.15,
            tilt: -51.2,
            center_x: 320.0,
            depth_span: 312.0,
            depth_floor: 1e-4,

            // Camera
            anchor_offset: 129.6,
            road_scroll: 0.004,
            scenery_scroll: 0.003,
            cloud_scroll: 0.002,
            offscreen_margin: 40.0,

            // Player sprite
            player_size: 28.8,
            player_hitbox_w: 0.35,
            player_hitbox_h: 0.65,
        }
    }
}

impl Tuning {
    /// Validate once at session construction.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.half_top < 0.0 || self.half_bottom < self.half_top {
            return Err(TuningError::RoadWidths {
                top: self.half_top,
                bottom: self.half_bottom,
            });
        }
        for (field, value) in [
            ("base_speed", self.base_speed),
            ("max_multiplier", self.max_multiplier),
            ("lateral_drag", self.lateral_drag),
            ("steer_floor", self.steer_floor),
            ("yellow_ms", self.yellow_ms),
            ("light_min_ms", self.light_min_ms),
            ("depth_span", self.depth_span),
            ("depth_floor", self.depth_floor),
            ("scale_far", self.scale_far),
            ("scale_near", self.scale_near),
            ("scale_gamma", self.scale_gamma),
            ("player_size", self.player_size),
            ("player_hitbox_w", self.player_hitbox_w),
            ("player_hitbox_h", self.player_hitbox_h),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("wall_bounce", self.wall_bounce),
            ("spawn_chance", self.spawn_chance),
            ("oncoming_bias", self.oncoming_bias),
            ("oncoming_spawn_depth", self.oncoming_spawn_depth),
            ("trailing_spawn_depth", self.trailing_spawn_depth),
            ("lane_offset_frac", self.lane_offset_frac),
            ("depth_floor", self.depth_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::UnitRange { field, value });
            }
        }
        if self.light_min_ms > self.light_max_ms {
            return Err(TuningError::LightIntervals {
                min: self.light_min_ms,
                max: self.light_max_ms,
            });
        }
        if self.min_cooldown_ms > self.max_cooldown_ms {
            return Err(TuningError::CooldownRange {
                min: self.min_cooldown_ms,
                max: self.max_cooldown_ms,
            });
        }
        let ascending = self
            .speed_tiers
            .windows(2)
            .all(|w| w[0] < w[1]);
        let in_range = self
            .speed_tiers
            .iter()
            .all(|&m| m > 0.0 && m <= self.max_multiplier);
        if self.speed_tiers.is_empty() || !ascending || !in_range {
            return Err(TuningError::SpeedTiers);
        }
        Ok(())
    }

    /// Multiplier for a discrete input tier; `None` means "no input held".
    /// Tiers past the top of the ladder saturate at the fastest one.
    pub fn tier_multiplier(&self, tier: Option<usize>) -> f32 {
        match tier {
            None => 0.0,
            Some(level) => {
                let top = self.speed_tiers.len().saturating_sub(1);
                self.speed_tiers[level.min(top)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_road_widths_rejected() {
        let mut t = Tuning::default();
        t.half_bottom = t.half_top - 1.0;
        assert!(matches!(t.validate(), Err(TuningError::RoadWidths { .. })));
    }

    #[test]
    fn test_empty_cooldown_range_rejected() {
        let mut t = Tuning::default();
        t.min_cooldown_ms = 8000.0;
        assert!(matches!(t.validate(), Err(TuningError::CooldownRange { .. })));
    }

    #[test]
    fn test_empty_light_range_rejected() {
        let mut t = Tuning::default();
        t.light_min_ms = t.light_max_ms + 1.0;
        assert!(matches!(t.validate(), Err(TuningError::LightIntervals { .. })));
    }

    #[test]
    fn test_spawn_chance_out_of_range_rejected() {
        let mut t = Tuning::default();
        t.spawn_chance = 1.5;
        assert_eq!(
            t.validate(),
            Err(TuningError::UnitRange {
                field: "spawn_chance",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_nan_base_speed_rejected() {
        let mut t = Tuning::default();
        t.base_speed = f32::NAN;
        assert!(matches!(t.validate(), Err(TuningError::NonPositive { .. })));
    }

    #[test]
    fn test_descending_tiers_rejected() {
        let mut t = Tuning::default();
        t.speed_tiers = vec![0.6, 0.3];
        assert_eq!(t.validate(), Err(TuningError::SpeedTiers));
    }

    #[test]
    fn test_tier_multiplier_ladder() {
        let t = Tuning::default();
        assert_eq!(t.tier_multiplier(None), 0.0);
        assert_eq!(t.tier_multiplier(Some(0)), 0.3);
        assert_eq!(t.tier_multiplier(Some(5)), 1.6);
        // past the top of the ladder saturates
        assert_eq!(t.tier_multiplier(Some(99)), 1.6);
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"base_speed": 90.0}"#).unwrap();
        assert_eq!(t.base_speed, 90.0);
        assert_eq!(t.max_multiplier, Tuning::default().max_multiplier);
        assert!(t.validate().is_ok());
    }
}
