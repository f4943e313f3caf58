//! Transient road hazard
//!
//! At most one obstacle exists at a time. Oncoming hazards appear near the
//! horizon in the left lane and drive toward the camera; trailing hazards
//! appear near the bottom edge in the right lane and drive toward the
//! horizon. While active the world-x is re-anchored to the lane center at
//! the current depth every tick, so the hazard stays visually in lane under
//! the nonlinear perspective without ever steering.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::WorldBox;
use super::road::RoadProjection;
use crate::tuning::Tuning;

/// Which lane the hazard occupies, and implicitly its direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleLane {
    Oncoming,
    Trailing,
}

/// The single transient hazard slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub active: bool,
    pub lane: ObstacleLane,
    /// World position (x = lateral, y = progress axis)
    pub pos: Vec2,
    /// World units per second; positive moves toward the horizon
    pub speed: f32,
    pub cooldown_ms: f32,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            active: false,
            lane: ObstacleLane::Oncoming,
            pos: Vec2::ZERO,
            speed: 0.0,
            cooldown_ms: 0.0,
        }
    }
}

impl Obstacle {
    /// One tick: cooldown, spawn roll, movement, lane centering, despawn.
    pub fn step(
        &mut self,
        dt_ms: f32,
        rng: &mut Pcg32,
        road: &RoadProjection,
        camera_depth: f32,
        tuning: &Tuning,
    ) {
        if !self.active {
            self.cooldown_ms = (self.cooldown_ms - dt_ms).max(0.0);
            if self.cooldown_ms == 0.0 && rng.random::<f32>() < tuning.spawn_chance {
                self.spawn(rng, road, camera_depth, tuning);
            }
            return;
        }

        let dt_s = dt_ms / 1000.0;
        self.pos.y += -self.speed * dt_s;

        // re-anchor to the lane center at the new depth
        let v = road.depth_of(self.pos.y, camera_depth);
        self.pos.x = self.lane_center_world(v, road, tuning);

        if road.past_horizon(self.pos.y, camera_depth, tuning.despawn_far_margin)
            || road.past_bottom(self.pos.y, camera_depth, tuning.despawn_near_margin)
        {
            self.active = false;
            self.cooldown_ms = rng.random_range(tuning.min_cooldown_ms..=tuning.max_cooldown_ms);
            log::debug!("obstacle despawned, cooldown {:.0} ms", self.cooldown_ms);
        }
    }

    fn spawn(&mut self, rng: &mut Pcg32, road: &RoadProjection, camera_depth: f32, tuning: &Tuning) {
        let (lane, spawn_depth, speed) = if rng.random::<f32>() < tuning.oncoming_bias {
            (
                ObstacleLane::Oncoming,
                tuning.oncoming_spawn_depth,
                -tuning.oncoming_speed,
            )
        } else {
            (
                ObstacleLane::Trailing,
                tuning.trailing_spawn_depth,
                tuning.trailing_speed,
            )
        };
        self.lane = lane;
        self.speed = speed;
        self.pos.y = road.world_y_at(spawn_depth, camera_depth);
        self.pos.x = self.lane_center_world(spawn_depth, road, tuning);
        self.active = true;
        log::debug!("obstacle spawned: {lane:?}");
    }

    /// World-x of this lane's center at depth `v`: a fixed fraction of the
    /// road half-width, left of center for oncoming, right for trailing.
    pub fn lane_center_world(&self, v: f32, road: &RoadProjection, tuning: &Tuning) -> f32 {
        let offset_px = road.lane_half_width(v) * tuning.lane_offset_frac;
        let signed = match self.lane {
            ObstacleLane::Oncoming => -offset_px,
            ObstacleLane::Trailing => offset_px,
        };
        road.half_width_to_world(signed, v)
    }

    /// World-space box, `None` while inactive (no collision eligibility).
    pub fn world_box(
        &self,
        road: &RoadProjection,
        camera_depth: f32,
        tuning: &Tuning,
    ) -> Option<WorldBox> {
        if !self.active {
            return None;
        }
        let v = road.depth_of(self.pos.y, camera_depth);
        let half_lane = road.lane_half_width(v) * 0.5;
        let px_half = (half_lane * tuning.obstacle_hitbox_w).max(tuning.obstacle_hitbox_min_px);
        let half_w = road.half_width_to_world(px_half, v);
        let height = tuning.player_size * road.sprite_scale(v) * tuning.obstacle_hitbox_h;
        Some(WorldBox {
            min: Vec2::new(self.pos.x - half_w, self.pos.y - height),
            max: Vec2::new(self.pos.x + half_w, self.pos.y),
        })
    }

    /// Pin the hazard into a known state.
    #[cfg(test)]
    pub(crate) fn activate_for_test(&mut self, lane: ObstacleLane, pos: Vec2, speed: f32) {
        self.active = true;
        self.lane = lane;
        self.pos = pos;
        self.speed = speed;
    }
}
