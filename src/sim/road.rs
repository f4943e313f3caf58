//! Road perspective geometry
//!
//! Pure functions of a normalized depth fraction `v` (0 = horizon, 1 = near
//! edge): lane half-width, sprite scale and screen-space positions, plus the
//! inverse mapping from screen-space half-widths to world-space lateral
//! bounds. Both the simulation (road confinement, hitboxes) and external
//! renderers project through this type, so the two never disagree.

use serde::{Deserialize, Serialize};

use crate::lerp;
use crate::tuning::Tuning;

/// Perspective mapping for the trapezoid road.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoadProjection {
    half_top: f32,
    half_bottom: f32,
    scale_far: f32,
    scale_near: f32,
    scale_gamma: f32,
    tilt: f32,
    center_x: f32,
    depth_span: f32,
    depth_floor: f32,
}

impl RoadProjection {
    pub fn from_tuning(t: &Tuning) -> Self {
        Self {
            half_top: t.half_top,
            half_bottom: t.half_bottom,
            scale_far: t.scale_far,
            scale_near: t.scale_near,
            scale_gamma: t.scale_gamma,
            tilt: t.tilt,
            center_x: t.center_x,
            depth_span: t.depth_span,
            depth_floor: t.depth_floor,
        }
    }

    /// Distance from horizon to near edge, in reference px.
    #[inline]
    pub fn depth_span(&self) -> f32 {
        self.depth_span
    }

    /// Clamp a depth fraction into the projectable range; non-finite input
    /// collapses to the floor.
    #[inline]
    pub fn clamp_depth(&self, v: f32) -> f32 {
        if v.is_finite() {
            v.clamp(self.depth_floor, 1.0)
        } else {
            self.depth_floor
        }
    }

    /// Road half-width at depth `v` (screen px).
    #[inline]
    pub fn lane_half_width(&self, v: f32) -> f32 {
        lerp(self.half_top, self.half_bottom, self.clamp_depth(v))
    }

    /// Sprite scale at depth `v`.
    #[inline]
    pub fn sprite_scale(&self, v: f32) -> f32 {
        let v = self.clamp_depth(v);
        self.scale_far + (self.scale_near - self.scale_far) * v.powf(self.scale_gamma)
    }

    /// Screen-space road center at depth `v`; the tilt pulls the vanishing
    /// point sideways, strongest at the horizon.
    #[inline]
    pub fn screen_center_x(&self, v: f32) -> f32 {
        self.center_x + self.tilt * (1.0 - self.clamp_depth(v))
    }

    /// Project a world-space lateral offset to screen x at depth `v`.
    /// Lateral offsets shrink toward the horizon (perspective-divide
    /// approximation).
    #[inline]
    pub fn world_to_screen_x(&self, world_x: f32, v: f32) -> f32 {
        self.screen_center_x(v) + world_x * self.clamp_depth(v)
    }

    /// Invert a screen-space half-width into world units at depth `v`.
    #[inline]
    pub fn half_width_to_world(&self, px_half: f32, v: f32) -> f32 {
        px_half / self.clamp_depth(v)
    }

    /// World-space lateral bounds keeping a hitbox of screen half-width
    /// `px_half` inside the road at depth `v`. Returns `(min, max)`; a hitbox
    /// wider than the road pins to the lane center.
    pub fn lateral_bounds(&self, v: f32, px_half: f32) -> (f32, f32) {
        let bound = (self.lane_half_width(v) - px_half).max(0.0) / self.clamp_depth(v);
        (-bound, bound)
    }

    /// Depth fraction of a world y relative to the camera, clamped into the
    /// projectable range.
    #[inline]
    pub fn depth_of(&self, world_y: f32, camera_depth: f32) -> f32 {
        self.clamp_depth((world_y - camera_depth) / self.depth_span)
    }

    /// Raw screen offset below the horizon (px, unclamped); used for despawn
    /// and off-screen margins.
    #[inline]
    pub fn screen_offset(&self, world_y: f32, camera_depth: f32) -> f32 {
        world_y - camera_depth
    }

    /// World y that projects to depth `v` under the given camera.
    #[inline]
    pub fn world_y_at(&self, v: f32, camera_depth: f32) -> f32 {
        camera_depth + self.clamp_depth(v) * self.depth_span
    }

    /// Whether a world y has fallen more than `margin` px past the bottom
    /// edge.
    #[inline]
    pub fn past_bottom(&self, world_y: f32, camera_depth: f32, margin: f32) -> bool {
        self.screen_offset(world_y, camera_depth) > self.depth_span + margin
    }

    /// Whether a world y sits more than `margin` px above the horizon.
    #[inline]
    pub fn past_horizon(&self, world_y: f32, camera_depth: f32, margin: f32) -> bool {
        self.screen_offset(world_y, camera_depth) < -margin
    }
}
