//! Race session aggregate
//!
//! Owns every entity, the single seeded RNG and the outcome. All state that
//! was ever module-level in the prototype lives here; nothing survives a
//! session boundary. Construction validates the tuning once; after that no
//! operation can fail.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera::{Camera, Parallax};
use super::light::{LightState, TrafficLight};
use super::obstacle::{Obstacle, ObstacleLane};
use super::player::Player;
use super::road::RoadProjection;
use crate::tuning::{Tuning, TuningError};
use glam::Vec2;

/// Exactly two competitors race.
pub const PLAYER_COUNT: usize = 2;

/// Why the race ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinReason {
    /// The trailing player fell past the bottom screen margin
    TrailingOffscreen,
    /// A player was struck by the hazard; the other wins
    ObstacleStrike,
}

/// Terminal state of the race. A normal outcome, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RaceOutcome {
    pub terminal: bool,
    pub winner: Option<u32>,
    pub reason: Option<WinReason>,
}

/// Per-player slice of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub progress: f32,
    pub lateral_pos: f32,
    pub speed_multiplier: f32,
}

/// Hazard slice of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleSnapshot {
    pub active: bool,
    pub lane: ObstacleLane,
    pub pos: Vec2,
}

/// Camera slice of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraSnapshot {
    pub depth: f32,
    pub parallax: Parallax,
}

/// Immutable per-tick export. Renderers project it through
/// [`RoadProjection`] themselves; the core never emits pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceSnapshot {
    pub light: LightState,
    pub players: [PlayerSnapshot; PLAYER_COUNT],
    pub obstacle: ObstacleSnapshot,
    pub camera: CameraSnapshot,
    pub outcome: RaceOutcome,
    pub elapsed_ms: f32,
    pub tick: u64,
}

/// The complete mutable race aggregate, owned exclusively by its caller.
#[derive(Debug, Clone)]
pub struct RaceSession {
    pub(crate) tuning: Tuning,
    pub(crate) road: RoadProjection,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) light: TrafficLight,
    pub(crate) players: [Player; PLAYER_COUNT],
    pub(crate) obstacle: Obstacle,
    pub(crate) camera: Camera,
    pub(crate) outcome: RaceOutcome,
    pub(crate) elapsed_ms: f32,
    pub(crate) ticks: u64,
}

impl RaceSession {
    /// Validate the tuning and build all components atomically.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let road = RoadProjection::from_tuning(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let light = TrafficLight::new(&tuning, &mut rng);
        let lateral = tuning.player_size * tuning.start_lateral_frac;
        let players = [
            Player::new(0, tuning.start_progress, -lateral),
            Player::new(1, tuning.start_progress, lateral),
        ];
        let camera = Camera::new(tuning.start_progress, &tuning);
        log::info!("race session created (seed {seed})");
        Ok(Self {
            tuning,
            road,
            seed,
            rng,
            light,
            players,
            obstacle: Obstacle::default(),
            camera,
            outcome: RaceOutcome::default(),
            elapsed_ms: 0.0,
            ticks: 0,
        })
    }

    /// Atomic reset to start-of-session values, RNG included: a reset
    /// session replays identically to a fresh one with the same seed.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.light = TrafficLight::new(&self.tuning, &mut self.rng);
        let lateral = self.tuning.player_size * self.tuning.start_lateral_frac;
        self.players[0].reset(self.tuning.start_progress, -lateral);
        self.players[1].reset(self.tuning.start_progress, lateral);
        self.obstacle = Obstacle::default();
        self.camera = Camera::new(self.tuning.start_progress, &self.tuning);
        self.outcome = RaceOutcome::default();
        self.elapsed_ms = 0.0;
        self.ticks = 0;
        log::info!("race session reset");
    }

    /// Mark the race over. Further ticks are frozen until reset.
    pub(crate) fn finish(&mut self, winner: u32, reason: WinReason) {
        self.outcome = RaceOutcome {
            terminal: true,
            winner: Some(winner),
            reason: Some(reason),
        };
        log::info!("race over: player {winner} wins ({reason:?})");
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn road(&self) -> &RoadProjection {
        &self.road
    }

    pub fn outcome(&self) -> RaceOutcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.terminal
    }

    /// Immutable export of the current state.
    pub fn snapshot(&self) -> RaceSnapshot {
        let player = |p: &Player| PlayerSnapshot {
            id: p.id,
            progress: p.progress,
            lateral_pos: p.lateral_pos,
            speed_multiplier: p.speed_multiplier,
        };
        RaceSnapshot {
            light: self.light.state(),
            players: [player(&self.players[0]), player(&self.players[1])],
            obstacle: ObstacleSnapshot {
                active: self.obstacle.active,
                lane: self.obstacle.lane,
                pos: self.obstacle.pos,
            },
            camera: CameraSnapshot {
                depth: self.camera.depth,
                parallax: self.camera.parallax,
            },
            outcome: self.outcome,
            elapsed_ms: self.elapsed_ms,
            tick: self.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{tick, TickInput};

    #[test]
    fn test_construction_rejects_bad_tuning() {
        let mut t = Tuning::default();
        t.min_cooldown_ms = t.max_cooldown_ms + 1.0;
        assert!(RaceSession::new(t, 1).is_err());
    }

    #[test]
    fn test_players_start_mirrored_on_the_start_line() {
        let s = RaceSession::new(Tuning::default(), 1).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.players[0].progress, snap.players[1].progress);
        assert_eq!(snap.players[0].lateral_pos, -snap.players[1].lateral_pos);
        assert_eq!(snap.light, LightState::Green);
        assert!(!snap.outcome.terminal);
    }

    #[test]
    fn test_reset_replays_like_a_fresh_session() {
        let t = Tuning::default();
        let mut fresh = RaceSession::new(t.clone(), 42).unwrap();
        let mut reused = RaceSession::new(t, 42).unwrap();

        let mut input = TickInput::default();
        input.players[0].speed_multiplier = 1.0;
        input.players[1].speed_multiplier = 0.6;
        // dirty the reused session, then reset it
        for _ in 0..50 {
            tick(&mut reused, &input, 16.0);
        }
        reused.reset();

        for _ in 0..50 {
            tick(&mut fresh, &input, 16.0);
            tick(&mut reused, &input, 16.0);
            assert_eq!(fresh.snapshot(), reused.snapshot());
        }
    }
}
