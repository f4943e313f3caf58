//! Collision detection and response
//!
//! Everything works on world-space axis-aligned boxes derived through the
//! road projection, so two entities at different depths compare correctly.
//! Player-player contact is a damped side bump; player-obstacle contact ends
//! the race.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::Player;
use super::road::RoadProjection;
use crate::tuning::Tuning;

/// World-space axis-aligned box (x = lateral, y = progress).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBox {
    /// Positive overlap extents on both axes, or `None` when separated.
    pub fn overlap(&self, other: &WorldBox) -> Option<Vec2> {
        let x = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let y = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        (x > 0.0 && y > 0.0).then(|| Vec2::new(x, y))
    }

    #[inline]
    pub fn intersects(&self, other: &WorldBox) -> bool {
        self.overlap(other).is_some()
    }
}

/// Resolve a player-player side bump.
///
/// Each player is pushed laterally outward by half the overlap (by current
/// relative ordering) and takes half the other's pre-collision lateral
/// velocity - a symmetric, intentionally lossy exchange that cannot
/// oscillate. Both players are re-clamped to the road afterwards.
pub fn resolve_player_pair(
    a: &mut Player,
    b: &mut Player,
    road: &RoadProjection,
    camera_depth: f32,
    tuning: &Tuning,
) {
    let box_a = a.world_box(road, camera_depth, tuning);
    let box_b = b.world_box(road, camera_depth, tuning);
    let Some(overlap) = box_a.overlap(&box_b) else {
        return;
    };

    let push = overlap.x * 0.5;
    if a.lateral_pos <= b.lateral_pos {
        a.lateral_pos -= push;
        b.lateral_pos += push;
    } else {
        a.lateral_pos += push;
        b.lateral_pos -= push;
    }

    let (va, vb) = (a.lateral_vel, b.lateral_vel);
    a.lateral_vel = vb * 0.5;
    b.lateral_vel = va * 0.5;

    a.clamp_to_road(road, camera_depth, tuning);
    b.clamp_to_road(road, camera_depth, tuning);
}

/// Index of the first player overlapping the active obstacle, if any.
pub fn obstacle_strike(
    players: &[Player],
    obstacle: &Obstacle,
    road: &RoadProjection,
    camera_depth: f32,
    tuning: &Tuning,
) -> Option<usize> {
    let obstacle_box = obstacle.world_box(road, camera_depth, tuning)?;
    players
        .iter()
        .position(|p| p.world_box(road, camera_depth, tuning).intersects(&obstacle_box))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleLane;

    fn setup() -> (Tuning, RoadProjection, f32) {
        let t = Tuning::default();
        let road = RoadProjection::from_tuning(&t);
        let camera_depth = t.start_progress - t.anchor_offset;
        (t, road, camera_depth)
    }

    #[test]
    fn test_overlap_extents() {
        let a = WorldBox {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(10.0, 10.0),
        };
        let b = WorldBox {
            min: Vec2::new(8.0, 6.0),
            max: Vec2::new(20.0, 20.0),
        };
        assert_eq!(a.overlap(&b), Some(Vec2::new(2.0, 4.0)));
        let c = WorldBox {
            min: Vec2::new(11.0, 0.0),
            max: Vec2::new(12.0, 10.0),
        };
        assert!(a.overlap(&c).is_none());
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let a = WorldBox {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(10.0, 10.0),
        };
        let b = WorldBox {
            min: Vec2::new(10.0, 0.0),
            max: Vec2::new(20.0, 10.0),
        };
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_bump_separates_and_swaps_half_velocity() {
        let (t, road, cam) = setup();
        let mut a = Player::new(0, t.start_progress, -2.0);
        let mut b = Player::new(1, t.start_progress, 2.0);
        a.lateral_vel = 40.0;
        b.lateral_vel = -10.0;

        resolve_player_pair(&mut a, &mut b, &road, cam, &t);

        // ordering preserved, overlap gone (or strictly smaller)
        assert!(a.lateral_pos < b.lateral_pos);
        let box_a = a.world_box(&road, cam, &t);
        let box_b = b.world_box(&road, cam, &t);
        let residual = box_a.overlap(&box_b).map_or(0.0, |o| o.x);
        assert!(residual < 1e-3);
        // symmetric lossy exchange
        assert_eq!(a.lateral_vel, -5.0);
        assert_eq!(b.lateral_vel, 20.0);
    }

    #[test]
    fn test_exactly_coincident_players_separate() {
        let (t, road, cam) = setup();
        let mut a = Player::new(0, t.start_progress, 0.0);
        let mut b = Player::new(1, t.start_progress, 0.0);
        resolve_player_pair(&mut a, &mut b, &road, cam, &t);
        assert!(b.lateral_pos - a.lateral_pos >= 0.0);
        assert!(b.lateral_pos > a.lateral_pos);
    }

    #[test]
    fn test_separated_pair_untouched() {
        let (t, road, cam) = setup();
        let mut a = Player::new(0, t.start_progress, -100.0);
        let mut b = Player::new(1, t.start_progress, 100.0);
        a.lateral_vel = 7.0;
        resolve_player_pair(&mut a, &mut b, &road, cam, &t);
        assert_eq!(a.lateral_pos, -100.0);
        assert_eq!(a.lateral_vel, 7.0);
    }

    #[test]
    fn test_obstacle_strike_reports_covered_player() {
        let (t, road, cam) = setup();
        let players = [
            Player::new(0, t.start_progress, -20.0),
            Player::new(1, t.start_progress, 200.0),
        ];
        let mut obstacle = Obstacle::default();
        obstacle.activate_for_test(
            ObstacleLane::Oncoming,
            Vec2::new(-20.0, t.start_progress),
            0.0,
        );
        assert_eq!(
            obstacle_strike(&players, &obstacle, &road, cam, &t),
            Some(0)
        );
    }

    #[test]
    fn test_inactive_obstacle_never_strikes() {
        let (t, road, cam) = setup();
        let players = [
            Player::new(0, t.start_progress, 0.0),
            Player::new(1, t.start_progress, 0.0),
        ];
        let obstacle = Obstacle::default();
        assert_eq!(obstacle_strike(&players, &obstacle, &road, cam, &t), None);
    }
}
