//! Leader-following camera and parallax bookkeeping
//!
//! The camera depth tracks the furthest-advanced player so the leader stays
//! at a fixed screen height. Per-tick depth deltas drive the parallax scroll
//! accumulators; closer layers use larger coefficients.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::wrap_unit;

/// Scroll accumulators per background layer, each wrapped to [0, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub road: f32,
    pub scenery: f32,
    pub cloud: f32,
}

/// Camera state. Pure bookkeeping, no gating logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub depth: f32,
    prev_depth: f32,
    pub parallax: Parallax,
}

impl Camera {
    /// Anchored on the given progress from the start, so the first tick
    /// produces no parallax jump.
    pub fn new(lead_progress: f32, tuning: &Tuning) -> Self {
        let depth = lead_progress - tuning.anchor_offset;
        Self {
            depth,
            prev_depth: depth,
            parallax: Parallax::default(),
        }
    }

    /// Follow the leading player and accumulate layer scroll from the depth
    /// delta.
    pub fn follow(&mut self, lead_progress: f32, tuning: &Tuning) {
        self.depth = lead_progress - tuning.anchor_offset;
        let delta = self.depth - self.prev_depth;
        self.parallax.road = wrap_unit(self.parallax.road - delta * tuning.road_scroll);
        self.parallax.scenery = wrap_unit(self.parallax.scenery - delta * tuning.scenery_scroll);
        self.parallax.cloud = wrap_unit(self.parallax.cloud - delta * tuning.cloud_scroll);
        self.prev_depth = self.depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_anchors_leader() {
        let t = Tuning::default();
        let cam = Camera::new(0.0, &t);
        assert_eq!(cam.depth, -t.anchor_offset);
    }

    #[test]
    fn test_no_jump_on_first_follow() {
        let t = Tuning::default();
        let mut cam = Camera::new(0.0, &t);
        cam.follow(0.0, &t);
        assert_eq!(cam.parallax, Parallax::default());
    }

    #[test]
    fn test_advancing_leader_scrolls_layers_forward() {
        let t = Tuning::default();
        let mut cam = Camera::new(0.0, &t);
        // leader advances 10 world units (progress decreases)
        cam.follow(-10.0, &t);
        assert_eq!(cam.depth, -10.0 - t.anchor_offset);
        assert!((cam.parallax.road - wrap_unit(10.0 * t.road_scroll)).abs() < 1e-6);
        // road layer is the closest, so it scrolls fastest
        assert!(cam.parallax.road > cam.parallax.scenery);
        assert!(cam.parallax.scenery > cam.parallax.cloud);
    }

    #[test]
    fn test_scroll_wraps_into_unit_range() {
        let t = Tuning::default();
        let mut cam = Camera::new(0.0, &t);
        let mut progress = 0.0;
        for _ in 0..100 {
            progress -= 37.0;
            cam.follow(progress, &t);
            for s in [cam.parallax.road, cam.parallax.scenery, cam.parallax.cloud] {
                assert!((0.0..1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_backward_movement_reverses_scroll() {
        let t = Tuning::default();
        let mut cam = Camera::new(0.0, &t);
        cam.follow(-10.0, &t);
        let forward = cam.parallax.road;
        // reverse penalty drags the leader back toward the start
        cam.follow(-5.0, &t);
        assert!(cam.parallax.road < forward);
    }
}
