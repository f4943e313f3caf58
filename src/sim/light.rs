//! Traffic light state machine
//!
//! Cycles Green -> Yellow -> Red -> Yellow -> Green forever. Yellow buffers
//! both directions with a fixed dwell; Green and Red dwell times are drawn
//! uniformly from the configured range at the moment the state is entered.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The three lamp states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

/// Fixed cycle; the same Yellow state appears in two transition roles.
const CYCLE: [LightState; 4] = [
    LightState::Green,
    LightState::Yellow,
    LightState::Red,
    LightState::Yellow,
];

/// Dwell-timed light FSM. No terminal state; it runs for the lifetime of the
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLight {
    phase: usize,
    elapsed_ms: f32,
    interval_ms: f32,
}

impl TrafficLight {
    /// Start on Green with a freshly drawn dwell.
    pub fn new(tuning: &Tuning, rng: &mut Pcg32) -> Self {
        Self {
            phase: 0,
            elapsed_ms: 0.0,
            interval_ms: interval_for(CYCLE[0], tuning, rng),
        }
    }

    #[inline]
    pub fn state(&self) -> LightState {
        CYCLE[self.phase]
    }

    /// Forward motion is legal on Green and Yellow.
    #[inline]
    pub fn is_movement_legal(&self) -> bool {
        matches!(self.state(), LightState::Green | LightState::Yellow)
    }

    /// Dwell remaining before the next transition (ms).
    #[inline]
    pub fn remaining_ms(&self) -> f32 {
        (self.interval_ms - self.elapsed_ms).max(0.0)
    }

    /// Advance the dwell timer; at most one transition fires per tick.
    pub fn advance(&mut self, dt_ms: f32, tuning: &Tuning, rng: &mut Pcg32) {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.interval_ms {
            self.phase = (self.phase + 1) % CYCLE.len();
            self.elapsed_ms = 0.0;
            self.interval_ms = interval_for(self.state(), tuning, rng);
            log::debug!("traffic light -> {:?}", self.state());
        }
    }

    /// Pin the light to a state with a fixed dwell.
    #[cfg(test)]
    pub(crate) fn force(state: LightState, interval_ms: f32) -> Self {
        let phase = match state {
            LightState::Green => 0,
            LightState::Yellow => 1,
            LightState::Red => 2,
        };
        Self {
            phase,
            elapsed_ms: 0.0,
            interval_ms,
        }
    }
}

fn interval_for(state: LightState, tuning: &Tuning, rng: &mut Pcg32) -> f32 {
    match state {
        LightState::Yellow => tuning.yellow_ms,
        _ => rng.random_range(tuning.light_min_ms..=tuning.light_max_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_initial_state_is_green() {
        let t = Tuning::default();
        let light = TrafficLight::new(&t, &mut rng());
        assert_eq!(light.state(), LightState::Green);
        assert!(light.is_movement_legal());
    }

    #[test]
    fn test_cycle_order_green_yellow_red_yellow() {
        let t = Tuning::default();
        let mut r = rng();
        let mut light = TrafficLight::new(&t, &mut r);
        let mut seen = Vec::new();
        for _ in 0..4 {
            // jump straight past the current dwell
            light.advance(light.remaining_ms(), &t, &mut r);
            seen.push(light.state());
        }
        assert_eq!(
            seen,
            vec![
                LightState::Yellow,
                LightState::Red,
                LightState::Yellow,
                LightState::Green
            ]
        );
    }

    #[test]
    fn test_yellow_dwell_is_fixed_and_others_in_range() {
        let t = Tuning::default();
        let mut r = rng();
        let mut light = TrafficLight::new(&t, &mut r);
        for _ in 0..40 {
            light.advance(light.remaining_ms(), &t, &mut r);
            let dwell = light.remaining_ms();
            match light.state() {
                LightState::Yellow => assert_eq!(dwell, t.yellow_ms),
                _ => assert!((t.light_min_ms..=t.light_max_ms).contains(&dwell)),
            }
        }
    }

    #[test]
    fn test_at_most_one_transition_per_tick() {
        let t = Tuning::default();
        let mut r = rng();
        let mut light = TrafficLight::new(&t, &mut r);
        // a dt spanning several dwells still advances a single phase
        light.advance(60_000.0, &t, &mut r);
        assert_eq!(light.state(), LightState::Yellow);
    }

    #[test]
    fn test_red_blocks_movement() {
        let light = TrafficLight::force(LightState::Red, 1000.0);
        assert!(!light.is_movement_legal());
        let light = TrafficLight::force(LightState::Yellow, 1000.0);
        assert!(light.is_movement_legal());
    }
}
