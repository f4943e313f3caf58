//! Fixed per-tick update
//!
//! The core is invoked once per external frame boundary with a delta time;
//! nothing in here blocks, suspends or schedules. Input is sampled into an
//! immutable [`TickInput`] before any mutation begins, and the update order
//! is fixed so identical seeds and inputs replay bit-identically.

use super::collision;
use super::player::PlayerInput;
use super::session::{PLAYER_COUNT, RaceSession, WinReason};

/// Immutable input snapshot for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub players: [PlayerInput; PLAYER_COUNT],
    /// Atomically reinitialize the whole session this tick
    pub reset: bool,
}

/// Advance the race by one tick of `dt_ms` milliseconds.
///
/// Order: reset request, light, forward progress, lateral motion,
/// player-player bump, obstacle, obstacle strike, camera, trailing-offscreen
/// check. Once the outcome is terminal every entity is frozen until reset.
pub fn tick(session: &mut RaceSession, input: &TickInput, dt_ms: f32) {
    if input.reset {
        session.reset();
        return;
    }
    if session.outcome.terminal {
        return;
    }
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    let dt_s = dt_ms / 1000.0;

    session.ticks += 1;
    session.elapsed_ms += dt_ms;

    session
        .light
        .advance(dt_ms, &session.tuning, &mut session.rng);
    let movement_legal = session.light.is_movement_legal();

    // player depths are taken against the camera as the renderer last saw
    // it; the camera itself moves at the end of the tick
    let camera_depth = session.camera.depth;

    for (player, pin) in session.players.iter_mut().zip(input.players.iter()) {
        player.set_multiplier(pin.speed_multiplier, &session.tuning);
        player.advance_progress(movement_legal, dt_s, &session.tuning);
        player.steer(pin.steer_left, pin.steer_right, dt_s, &session.tuning);
        player.clamp_to_road(&session.road, camera_depth, &session.tuning);
    }

    let [p1, p2] = &mut session.players;
    collision::resolve_player_pair(p1, p2, &session.road, camera_depth, &session.tuning);

    session.obstacle.step(
        dt_ms,
        &mut session.rng,
        &session.road,
        camera_depth,
        &session.tuning,
    );

    if let Some(struck) = collision::obstacle_strike(
        &session.players,
        &session.obstacle,
        &session.road,
        camera_depth,
        &session.tuning,
    ) {
        let winner = session.players[1 - struck].id;
        session.finish(winner, WinReason::ObstacleStrike);
        return;
    }

    let lead = session
        .players
        .iter()
        .map(|p| p.progress)
        .fold(f32::INFINITY, f32::min);
    session.camera.follow(lead, &session.tuning);

    for i in 0..PLAYER_COUNT {
        let fell_off = session.road.past_bottom(
            session.players[i].progress,
            session.camera.depth,
            session.tuning.offscreen_margin,
        );
        if fell_off {
            let winner = session.players[1 - i].id;
            session.finish(winner, WinReason::TrailingOffscreen);
            return;
        }
    }
}
