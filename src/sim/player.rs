//! Player kinematics
//!
//! Forward progress gated by the traffic light (moving on Red reverses the
//! player smoothly at the same magnitude, clamped at the starting line), and
//! lateral steering with exponential drag, speed-scaled authority and road
//! confinement.

use serde::{Deserialize, Serialize};

use super::collision::WorldBox;
use super::road::RoadProjection;
use crate::tuning::Tuning;
use glam::Vec2;

/// Per-tick input snapshot for one player. The multiplier may come from
/// keyboard speed tiers or a derived biosignal ratio; the core only sees the
/// float.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub speed_multiplier: f32,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// One competitor. `progress` is world y: decreasing = advancing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub progress: f32,
    pub lateral_pos: f32,
    pub lateral_vel: f32,
    /// Last sanitized multiplier, kept for the snapshot
    pub speed_multiplier: f32,
}

impl Player {
    pub fn new(id: u32, progress: f32, lateral_pos: f32) -> Self {
        Self {
            id,
            progress,
            lateral_pos,
            lateral_vel: 0.0,
            speed_multiplier: 0.0,
        }
    }

    /// Defensively clamp the raw multiplier input (NaN and negatives to 0).
    pub fn set_multiplier(&mut self, raw: f32, tuning: &Tuning) {
        self.speed_multiplier = if raw.is_finite() {
            raw.clamp(0.0, tuning.max_multiplier)
        } else {
            0.0
        };
    }

    /// Apply forward progress, or the smooth reverse penalty on Red.
    ///
    /// The reverse is the sole penalty for moving on a red light: same
    /// magnitude as forward speed, clamped so the player can never be pushed
    /// back past the starting line.
    pub fn advance_progress(&mut self, movement_legal: bool, dt_s: f32, tuning: &Tuning) {
        let m = self.speed_multiplier;
        if m <= 0.0 {
            return;
        }
        let step = tuning.base_speed * m * dt_s;
        if movement_legal {
            self.progress -= step;
        } else {
            self.progress = (self.progress + step).min(tuning.start_progress);
        }
    }

    /// Integrate lateral acceleration, drag and the speed-scaled velocity
    /// cap. `steer_floor` preserves minimal steering authority at zero
    /// forward speed.
    pub fn steer(&mut self, left: bool, right: bool, dt_s: f32, tuning: &Tuning) {
        let authority = self.speed_multiplier.max(tuning.steer_floor);
        let accel = tuning.lateral_accel * authority;
        let mut ax = 0.0;
        if left {
            ax -= accel;
        }
        if right {
            ax += accel;
        }
        self.lateral_vel += ax * dt_s;
        self.lateral_vel -= self.lateral_vel * tuning.lateral_drag * dt_s;
        let cap = tuning.lateral_max * authority;
        self.lateral_vel = self.lateral_vel.clamp(-cap, cap);
        self.lateral_pos += self.lateral_vel * dt_s;
    }

    /// Depth fraction of this player under the given camera.
    #[inline]
    pub fn depth(&self, road: &RoadProjection, camera_depth: f32) -> f32 {
        road.depth_of(self.progress, camera_depth)
    }

    /// Hitbox half-width in screen px at depth `v`.
    #[inline]
    pub fn hitbox_half_px(&self, v: f32, road: &RoadProjection, tuning: &Tuning) -> f32 {
        tuning.player_size * road.sprite_scale(v) * tuning.player_hitbox_w
    }

    /// Confine the player to the road at its current depth. A clamped player
    /// bounces: velocity reflected inward, scaled by `wall_bounce`.
    pub fn clamp_to_road(&mut self, road: &RoadProjection, camera_depth: f32, tuning: &Tuning) {
        let v = self.depth(road, camera_depth);
        let px_half = self.hitbox_half_px(v, road, tuning);
        let (min, max) = road.lateral_bounds(v, px_half);
        if self.lateral_pos < min {
            self.lateral_pos = min;
            self.lateral_vel = self.lateral_vel.abs() * tuning.wall_bounce;
        } else if self.lateral_pos > max {
            self.lateral_pos = max;
            self.lateral_vel = -self.lateral_vel.abs() * tuning.wall_bounce;
        }
    }

    /// World-space axis-aligned box; the anchor is the sprite's bottom, so
    /// the progress extent runs upward from `progress`.
    pub fn world_box(&self, road: &RoadProjection, camera_depth: f32, tuning: &Tuning) -> WorldBox {
        let v = self.depth(road, camera_depth);
        let half_w = road.half_width_to_world(self.hitbox_half_px(v, road, tuning), v);
        let height = tuning.player_size * road.sprite_scale(v) * tuning.player_hitbox_h;
        WorldBox {
            min: Vec2::new(self.lateral_pos - half_w, self.progress - height),
            max: Vec2::new(self.lateral_pos + half_w, self.progress),
        }
    }

    /// Back to the starting line with all motion zeroed.
    pub fn reset(&mut self, progress: f32, lateral_pos: f32) {
        self.progress = progress;
        self.lateral_pos = lateral_pos;
        self.lateral_vel = 0.0;
        self.speed_multiplier = 0.0;
    }
}
